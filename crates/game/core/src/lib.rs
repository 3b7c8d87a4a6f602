//! Deterministic realm-graph rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules (actions, the simulation tick,
//! world generation, realm graph state) and exposes pure APIs without any I/O.
//! All state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod state;
pub mod worldgen;

pub use action::{
    AbortDiscoveryAction, Action, ActionResult, ActionTransition, AttackAction, AttackError,
    AttackOutcome, BeginDiscoveryAction, CommitDiscoveryAction, DiscoveredRealm, DiscoveryError,
    EXHAUSTED_MESSAGE, FADED_MESSAGE, HealAction, HealError, HealOutcome, PlayerActionKind,
    SCANNING_MESSAGE, TransitActionKind, TravelAction, TravelError,
};
pub use config::GameConfig;
pub use engine::{
    ConnectorOutcome, DEFEAT_MESSAGE, ExecuteError, GameEngine, TickError, TickInput, TickOutcome,
    TransitionPhase, TransitionPhaseError,
};
pub use env::{GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{MoveInput, Point, clamp_to_realm, distance};
pub use state::{
    BiomeKind, Connector, ConnectorId, ConnectorKind, DiscoveryLog, EntityId, EntityKind,
    GameEntity, GameState, IdAllocator, PendingDiscovery, PlayerState, Realm, RealmDetails,
    RealmId, RealmStats, RealmStore, StoreError, TransitStatus, Timestamp, WELCOME_MESSAGE,
};
pub use worldgen::RealmBlueprint;
