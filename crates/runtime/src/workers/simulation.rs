//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the fixed-step tick, executes actions via [`game_core::GameEngine`], and
//! publishes events to the EventBus.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use game_core::{
    AbortDiscoveryAction, Action, ActionResult, CommitDiscoveryAction, ConnectorId,
    ConnectorOutcome, ExecuteError, GameConfig, GameEngine, GameEnv, GameError, GameState,
    MoveInput, PcgRng, PendingDiscovery, PlayerActionKind, TickInput, TickOutcome,
    TransitActionKind, Timestamp,
};

use super::transit::Resolution;
use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, TransitEvent};
use crate::runtime::TickMode;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Replace the movement input sampled by subsequent ticks.
    SetMovement { input: MoveInput },
    /// Execute a player action against the committed state.
    PlayerAction {
        kind: PlayerActionKind,
        reply: oneshot::Sender<Result<ActionResult>>,
    },
    /// Advance one tick (manual mode only).
    Step {
        reply: oneshot::Sender<Result<TickOutcome>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Channels wiring the simulation worker to the transit worker.
pub(crate) struct TransitLink {
    pub requests: mpsc::Sender<PendingDiscovery>,
    pub resolutions: mpsc::Receiver<Resolution>,
}

/// Background task that owns the state and serializes every mutation.
///
/// Ticks, player actions and discovery resolutions are all applied from the
/// same loop, so the engine never observes concurrent writers.
pub(crate) struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    rng: PcgRng,
    mode: TickMode,
    tick: u64,
    movement: MoveInput,
    /// Connector that last refused travel; repeated touches stay silent.
    refused: Option<ConnectorId>,
    command_rx: mpsc::Receiver<Command>,
    transit: TransitLink,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub(crate) fn new(
        state: GameState,
        config: GameConfig,
        mode: TickMode,
        command_rx: mpsc::Receiver<Command>,
        transit: TransitLink,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            realms = state.realms.len(),
            nonce = state.nonce,
            ?mode,
            "simulation worker initialized"
        );

        Self {
            state,
            config,
            rng: PcgRng,
            mode,
            tick: 0,
            movement: MoveInput::default(),
            refused: None,
            command_rx,
            transit,
            event_bus,
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub(crate) async fn run(mut self) {
        if let Some(pending) = self.state.transit.pending().copied() {
            info!(
                target: "runtime::worker",
                origin = %pending.origin,
                connector = %pending.connector,
                "resuming pending discovery"
            );
            if self.transit.requests.send(pending).await.is_err() {
                warn!(target: "runtime::worker", "transit worker is gone; releasing discovery");
                self.abort(pending, "text worker unavailable".into());
            }
        }

        let period = Duration::from_secs_f64(self.config.tick_interval_ms() / 1000.0);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let realtime = self.mode == TickMode::Realtime;

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(resolution) = self.transit.resolutions.recv() => {
                    self.resolve(resolution);
                }
                _ = ticker.tick(), if realtime => {
                    // Failures are logged inside; the loop keeps running.
                    let _ = self.advance().await;
                }
            }
        }

        debug!(target: "runtime::worker", ticks = self.tick, "simulation worker stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetMovement { input } => {
                self.movement = input;
            }
            Command::PlayerAction { kind, reply } => {
                let result = self.execute(Action::Player(kind)).map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "PlayerAction reply channel closed (caller dropped)");
                }
            }
            Command::Step { reply } => {
                let result = match self.mode {
                    TickMode::Manual => self.advance().await,
                    TickMode::Realtime => Err(RuntimeError::NotManual),
                };
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Step reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one tick and hands a touched connector over to the engine.
    async fn advance(&mut self) -> Result<TickOutcome> {
        let rate = u64::from(self.config.tick_rate_hz.max(1));
        let input = TickInput::new(
            self.movement,
            Timestamp::from_millis(self.tick * 1000 / rate),
        );
        self.tick += 1;

        let env = GameEnv::new(&self.config, &self.rng);
        let mut engine = GameEngine::new(&mut self.state);
        let outcome = match engine.tick(&env, input) {
            Ok(outcome) => outcome,
            Err(tick_error) => {
                error!(
                    target: "runtime::worker",
                    tick = self.tick,
                    realm = %self.state.player.current_realm,
                    code = tick_error.error_code(),
                    error = %tick_error,
                    "tick failed"
                );
                return Err(tick_error.into());
            }
        };

        match outcome {
            TickOutcome::Suspended => return Ok(outcome),
            TickOutcome::Advanced { .. } => {
                self.refused = None;
            }
            TickOutcome::Respawned { defeated_in } => {
                self.refused = None;
                info!(target: "runtime::worker", realm = %defeated_in, "player defeated");
                self.event_bus
                    .publish(Event::Transit(TransitEvent::PlayerRespawned { defeated_in }));
            }
            TickOutcome::ConnectorReached { connector } => {
                if self.refused == Some(connector) {
                    return Ok(outcome);
                }
                self.reach_connector(connector).await?;
            }
        }

        self.publish_committed();
        Ok(outcome)
    }

    async fn reach_connector(&mut self, connector: ConnectorId) -> Result<()> {
        let from = self.state.player.current_realm;
        let env = GameEnv::new(&self.config, &self.rng);
        let outcome = GameEngine::new(&mut self.state)
            .reach_connector(&env, connector)
            .inspect_err(|execute_error| {
                warn!(
                    target: "runtime::worker",
                    realm = %from,
                    connector = %connector,
                    code = execute_error.error_code(),
                    error = %execute_error,
                    "connector hand-off failed"
                );
            })?;

        match outcome {
            ConnectorOutcome::Exhausted => {
                self.refused = Some(connector);
                self.event_bus
                    .publish(Event::Transit(TransitEvent::TravelRefused {
                        realm: from,
                        connector,
                    }));
            }
            ConnectorOutcome::Travelled { to } => {
                self.refused = None;
                info!(target: "runtime::worker", %from, %to, "travelled");
                self.event_bus
                    .publish(Event::Transit(TransitEvent::Travelled { from, to }));
            }
            ConnectorOutcome::DiscoveryStarted(pending) => {
                self.refused = None;
                info!(
                    target: "runtime::worker",
                    origin = %pending.origin,
                    connector = %pending.connector,
                    level = pending.level,
                    biome = %pending.biome,
                    "discovery started"
                );
                self.event_bus
                    .publish(Event::Transit(TransitEvent::DiscoveryStarted(pending)));
                if self.transit.requests.send(pending).await.is_err() {
                    warn!(target: "runtime::worker", "transit worker is gone; releasing discovery");
                    self.abort(pending, "text worker unavailable".into());
                }
            }
            ConnectorOutcome::AlreadyPending(pending) => {
                debug!(
                    target: "runtime::worker",
                    pending_origin = %pending.origin,
                    connector = %connector,
                    "discovery already in flight"
                );
            }
        }
        Ok(())
    }

    /// Applies the transit worker's answer to the pending discovery.
    fn resolve(&mut self, resolution: Resolution) {
        let Resolution { pending, details } = resolution;
        if self.state.transit.pending() != Some(&pending) {
            warn!(
                target: "runtime::worker",
                origin = %pending.origin,
                connector = %pending.connector,
                "stale discovery resolution ignored"
            );
            return;
        }

        let details = match details {
            Ok(details) => details,
            Err(reason) => {
                self.abort(pending, reason);
                self.publish_committed();
                return;
            }
        };

        let action = Action::transit(TransitActionKind::CommitDiscovery(
            CommitDiscoveryAction::new(details),
        ));
        match self.execute(action) {
            Ok(ActionResult::RealmDiscovered(discovered)) => {
                let name = self
                    .state
                    .realm(discovered.realm)
                    .map(|realm| realm.name.clone())
                    .unwrap_or_default();
                info!(
                    target: "runtime::worker",
                    realm = %discovered.realm,
                    %name,
                    level = discovered.level,
                    "realm discovered"
                );
                self.event_bus
                    .publish(Event::Transit(TransitEvent::RealmDiscovered {
                        realm: discovered.realm,
                        origin: discovered.origin,
                        connector: discovered.connector,
                        name,
                        level: discovered.level,
                        biome: discovered.biome,
                    }));
            }
            Ok(other) => {
                error!(target: "runtime::worker", result = ?other, "unexpected commit result");
            }
            Err(execute_error) => {
                self.abort(pending, execute_error.to_string());
            }
        }
        self.publish_committed();
    }

    fn abort(&mut self, pending: PendingDiscovery, reason: String) {
        let action = Action::transit(TransitActionKind::AbortDiscovery(AbortDiscoveryAction));
        if self.execute(action).is_ok() {
            warn!(
                target: "runtime::worker",
                origin = %pending.origin,
                connector = %pending.connector,
                %reason,
                "discovery aborted"
            );
            self.event_bus
                .publish(Event::Transit(TransitEvent::DiscoveryAborted { pending, reason }));
        }
    }

    /// Executes an action and publishes the failure when it is rejected.
    fn execute(&mut self, action: Action) -> std::result::Result<ActionResult, ExecuteError> {
        let env = GameEnv::new(&self.config, &self.rng);
        let result = GameEngine::new(&mut self.state).execute(&env, &action);

        match &result {
            Ok(_) => {
                debug!(
                    target: "runtime::worker",
                    action = action.label(),
                    nonce = self.state.nonce,
                    "action committed"
                );
                if matches!(action, Action::Player(_)) {
                    self.publish_committed();
                }
            }
            Err(execute_error) if execute_error.severity().is_internal() => {
                error!(
                    target: "runtime::worker",
                    action = action.label(),
                    phase = execute_error.phase().as_str(),
                    code = execute_error.error_code(),
                    error = %execute_error,
                    "action broke a state invariant"
                );
                self.publish_failure(action, execute_error);
            }
            Err(execute_error) => {
                debug!(
                    target: "runtime::worker",
                    action = action.label(),
                    severity = execute_error.severity().as_str(),
                    code = execute_error.error_code(),
                    error = %execute_error,
                    "action rejected"
                );
                self.publish_failure(action, execute_error);
            }
        }
        result
    }

    fn publish_failure(&self, action: Action, execute_error: &ExecuteError) {
        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionFailed {
                phase: execute_error.phase(),
                error: execute_error.to_string(),
                code: execute_error.error_code(),
                action,
            }));
    }

    fn publish_committed(&self) {
        self.event_bus
            .publish(Event::GameState(GameStateEvent::Committed {
                tick: self.tick,
                nonce: self.state.nonce,
                state: Arc::new(self.state.clone()),
            }));
    }
}
