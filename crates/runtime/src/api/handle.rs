//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! steering the player, stepping the simulation or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{ActionResult, GameState, MoveInput, PlayerActionKind, TickOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Replace the movement input sampled by every following tick.
    pub async fn set_movement(&self, input: MoveInput) -> Result<()> {
        self.send(Command::SetMovement { input }).await
    }

    /// Strike the first entity within attack range.
    ///
    /// A rejected attack leaves the state untouched and is returned as
    /// [`RuntimeError::Execute`].
    pub async fn attack(&self) -> Result<ActionResult> {
        self.player_action(PlayerActionKind::Attack(Default::default()))
            .await
    }

    /// Trade stamina for health.
    pub async fn heal(&self) -> Result<ActionResult> {
        self.player_action(PlayerActionKind::Heal(Default::default()))
            .await
    }

    async fn player_action(&self, kind: PlayerActionKind) -> Result<ActionResult> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::PlayerAction {
            kind,
            reply: reply_tx,
        })
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Only available when the runtime was built with
    /// [`TickMode::Manual`](crate::TickMode::Manual).
    pub async fn step(&self) -> Result<TickOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Step { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - committed snapshots and rejected actions
    /// - `Topic::Transit` - discoveries, travel and respawns
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut transit_rx = handle.subscribe(Topic::Transit);
    /// while let Ok(event) = transit_rx.recv().await {
    ///     // Handle realm transitions
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QueryState { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
