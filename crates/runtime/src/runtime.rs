//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use game_content::{LoreLoader, LoreTable};
use game_core::{GameConfig, GameEnv, GameState, PcgRng, PendingDiscovery};

use crate::api::{RealmDetailsProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::providers::{LocalLoreProvider, ResilientProvider, RetryPolicy};
use crate::workers::{Command, Resolution, SimulationWorker, TransitLink, TransitWorker};

/// How the simulation clock advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickMode {
    /// Tick on a timer at `GameConfig::tick_rate_hz`.
    #[default]
    Realtime,
    /// Tick only when [`RuntimeHandle::step`] is called.
    Manual,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Session seed. A random seed is drawn when unset.
    pub seed: Option<u64>,
    pub player_name: String,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub tick_mode: TickMode,
    pub retry: RetryPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: None,
            player_name: "Nomad".into(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_mode: TickMode::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// Runtime owns the workers. [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    seed: u64,
    sim_worker_handle: JoinHandle<()>,
    transit_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed the session was started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers stop once every [`RuntimeHandle`] clone has been dropped, so
    /// drop outstanding handles before awaiting this.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.transit_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

enum ProviderSetup {
    /// Local lore only.
    Lore,
    /// Primary provider wrapped with retry and lore fallback.
    Resilient(Arc<dyn RealmDetailsProvider>),
    /// Provider used as-is; its failures abort discoveries.
    Raw(Arc<dyn RealmDetailsProvider>),
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    lore: Option<LoreTable>,
    provider: ProviderSetup,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            lore: None,
            provider: ProviderSetup::Lore,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume from an existing state instead of starting a new session.
    ///
    /// The state's own `game_seed` replaces [`RuntimeConfig::seed`]. A
    /// discovery still pending in the state is requested again on startup.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Word lists for local realm names. Defaults to the bundled lore.
    pub fn lore(mut self, lore: LoreTable) -> Self {
        self.lore = Some(lore);
        self
    }

    /// Primary source of realm names, retried per [`RuntimeConfig::retry`]
    /// and backed by local lore.
    pub fn details_provider(mut self, provider: impl RealmDetailsProvider + 'static) -> Self {
        self.provider = ProviderSetup::Resilient(Arc::new(provider));
        self
    }

    /// Use `provider` without retry or fallback. A provider error aborts the
    /// discovery.
    pub fn raw_details_provider(mut self, provider: impl RealmDetailsProvider + 'static) -> Self {
        self.provider = ProviderSetup::Raw(Arc::new(provider));
        self
    }

    /// Build the runtime and spawn its workers.
    pub async fn build(self) -> Result<Runtime> {
        // A resumed state keeps the seed its world was generated from.
        let (seed, initial_state) = match self.state {
            Some(state) => (state.game_seed, state),
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                let env = GameEnv::new(&self.config.game_config, &PcgRng);
                let state = GameState::new_session(seed, self.config.player_name.clone(), &env);
                (seed, state)
            }
        };

        let provider: Arc<dyn RealmDetailsProvider> = match self.provider {
            ProviderSetup::Raw(provider) => provider,
            ProviderSetup::Resilient(primary) => Arc::new(ResilientProvider::new(
                primary,
                local_lore(self.lore, seed)?,
                self.config.retry,
            )),
            ProviderSetup::Lore => Arc::new(local_lore(self.lore, seed)?),
        };

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (request_tx, request_rx) = mpsc::channel::<PendingDiscovery>(1);
        let (resolution_tx, resolution_rx) = mpsc::channel::<Resolution>(1);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let transit_worker = TransitWorker::new(provider, request_rx, resolution_tx);
        let transit_worker_handle = tokio::spawn(transit_worker.run());

        let sim_worker = SimulationWorker::new(
            initial_state,
            self.config.game_config,
            self.config.tick_mode,
            command_rx,
            TransitLink {
                requests: request_tx,
                resolutions: resolution_rx,
            },
            event_bus,
        );
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        info!(target: "runtime", seed, mode = ?self.config.tick_mode, "runtime started");

        Ok(Runtime {
            handle,
            seed,
            sim_worker_handle,
            transit_worker_handle,
        })
    }
}

fn local_lore(lore: Option<LoreTable>, seed: u64) -> Result<LocalLoreProvider> {
    let table = match lore {
        Some(table) => table,
        None => LoreLoader::builtin().map_err(RuntimeError::Lore)?,
    };
    Ok(LocalLoreProvider::new(table, seed))
}
