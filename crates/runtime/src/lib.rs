//! Runtime orchestration for the realm-exploration simulation.
//!
//! This crate wires the engine, the realm-details providers and the worker
//! tasks into a cohesive runtime API. Consumers embed [`Runtime`] to drive the
//! tick, subscribe to events, and interact with the world through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] sources realm names from an LLM or local lore
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    FixedDetailsProvider, ProviderError, RealmDetailsProvider, Result, RuntimeError,
    RuntimeHandle,
};
pub use events::{Event, EventBus, GameStateEvent, Topic, TransitEvent};
pub use providers::{
    ApiFormat, LlmConfig, LlmDetailsProvider, LocalLoreProvider, ResilientProvider, RetryPolicy,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TickMode};
