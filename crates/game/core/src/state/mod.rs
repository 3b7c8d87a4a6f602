//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the player, the realm
//! graph, the discovery log and the realm-transition state machine. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! engine.
pub mod log;
pub mod store;
pub mod transit;
pub mod types;

pub use log::DiscoveryLog;
pub use store::{RealmStore, StoreError};
pub use transit::{PendingDiscovery, TransitStatus};
pub use types::{
    BiomeKind, Connector, ConnectorId, ConnectorKind, EntityId, EntityKind, GameEntity,
    IdAllocator, PlayerState, Realm, RealmDetails, RealmId, RealmStats, Timestamp,
};

use crate::env::GameEnv;
use crate::worldgen;

pub const WELCOME_MESSAGE: &str = "Welcome to the Lost World, Nomad.";

/// Root aggregate of a game session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at session start and never modified. Combined with `nonce` to
    /// derive a unique seed for each random roll.
    pub game_seed: u64,

    /// Number of committed actions. Ticks do not advance it.
    pub nonce: u64,

    pub(crate) ids: IdAllocator,

    pub player: PlayerState,
    pub realms: RealmStore,
    pub discovery_log: DiscoveryLog,
    pub transit: TransitStatus,
}

impl GameState {
    /// Starts a session: a home realm owned by a fresh player standing at its
    /// center.
    pub fn new_session(game_seed: u64, player_name: impl Into<String>, env: &GameEnv<'_>) -> Self {
        let mut ids = IdAllocator::new();
        let home = worldgen::create_initial_realm(env, &mut ids, game_seed, EntityId::PLAYER);
        let player = PlayerState::new(player_name, home.id, env.config());

        let mut realms = RealmStore::new();
        // The store is empty, so the home realm cannot collide.
        let _ = realms.insert(home);

        Self {
            game_seed,
            nonce: 0,
            ids,
            player,
            realms,
            discovery_log: DiscoveryLog::with_entry(WELCOME_MESSAGE),
            transit: TransitStatus::Idle,
        }
    }

    pub fn realm(&self, id: RealmId) -> Option<&Realm> {
        self.realms.get(id)
    }

    /// The realm the player currently stands in.
    pub fn current_realm(&self) -> Option<&Realm> {
        self.realms.get(self.player.current_realm)
    }

    pub fn home_realm(&self) -> Option<&Realm> {
        self.realms.get(self.player.home_realm)
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }
}
