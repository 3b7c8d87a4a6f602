//! Read-only collaborators for the engine.
//!
//! The [`GameEnv`] bundles the tunables and the RNG oracle so world generation
//! and the engine can reach them without coupling to concrete implementations.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

/// Aggregates the read-only inputs required by the engine and world generator.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
