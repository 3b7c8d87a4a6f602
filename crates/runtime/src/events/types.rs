//! Event types for different topics.

use std::sync::Arc;

use game_core::engine::TransitionPhase;
use game_core::{Action, BiomeKind, ConnectorId, GameState, PendingDiscovery, RealmId};

/// Events related to game state changes.
#[derive(Debug, Clone)]
pub enum GameStateEvent {
    /// A new state was committed by a tick or an action.
    ///
    /// The snapshot is immutable and shares realms with the worker's state, so
    /// renderers can hold it without copying.
    Committed {
        tick: u64,
        nonce: u64,
        state: Arc<GameState>,
    },

    /// An action was rejected or failed during the execution pipeline
    ActionFailed {
        action: Action,
        phase: TransitionPhase,
        error: String,
        code: &'static str,
    },
}

/// Events related to realm transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitEvent {
    /// The player touched an unregistered connector and flavor text was requested.
    DiscoveryStarted(PendingDiscovery),

    /// A new realm was created and linked into the graph.
    RealmDiscovered {
        realm: RealmId,
        origin: RealmId,
        connector: ConnectorId,
        name: String,
        level: u32,
        biome: BiomeKind,
    },

    /// A pending discovery was released without creating a realm.
    DiscoveryAborted {
        pending: PendingDiscovery,
        reason: String,
    },

    /// The player crossed a registered connector.
    Travelled { from: RealmId, to: RealmId },

    /// The player touched a connector without enough stamina.
    TravelRefused {
        realm: RealmId,
        connector: ConnectorId,
    },

    /// The player died and woke up in the home realm.
    PlayerRespawned { defeated_in: RealmId },
}
