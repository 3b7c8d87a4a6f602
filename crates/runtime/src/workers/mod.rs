//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the state and runs the tick, while the transit
//! worker fetches flavor text for discoveries so slow providers never stall
//! the simulation.

mod simulation;
mod transit;

pub use simulation::Command;
pub(crate) use simulation::{SimulationWorker, TransitLink};
pub(crate) use transit::{Resolution, TransitWorker};
