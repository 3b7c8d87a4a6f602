//! Action domain.
//!
//! Actions are discrete state transitions that run through the engine's
//! three-phase pipeline (pre_validate → apply → post_validate). Two families
//! exist:
//!
//! - player actions triggered by explicit input (attack, heal)
//! - transit actions driven by the realm-transition coordinator (travel
//!   through a registered connector, begin/commit/abort a discovery)
//!
//! The per-tick simulation is not an action; see [`crate::engine`].

mod combat;
mod discovery;
mod heal;
mod travel;

pub use combat::{AttackAction, AttackError, AttackOutcome};
pub use discovery::{
    AbortDiscoveryAction, BeginDiscoveryAction, CommitDiscoveryAction, DiscoveredRealm,
    DiscoveryError, FADED_MESSAGE,
};
pub use heal::{HealAction, HealError, HealOutcome};
pub use travel::{TravelAction, TravelError};

use crate::env::GameEnv;
use crate::state::{GameState, PendingDiscovery, RealmId};

pub const EXHAUSTED_MESSAGE: &str = "Too exhausted to travel. Need rest.";
pub const SCANNING_MESSAGE: &str = "Scanning the horizon for a path...";

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Actions triggered by explicit player input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerActionKind {
    Attack(AttackAction),
    Heal(HealAction),
}

/// Actions owned by the realm-transition coordinator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitActionKind {
    Travel(TravelAction),
    BeginDiscovery(BeginDiscoveryAction),
    CommitDiscovery(CommitDiscoveryAction),
    AbortDiscovery(AbortDiscoveryAction),
}

/// Top-level action enum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Player(PlayerActionKind),
    Transit(TransitActionKind),
}

impl Action {
    pub fn attack() -> Self {
        Self::Player(PlayerActionKind::Attack(AttackAction))
    }

    pub fn heal() -> Self {
        Self::Player(PlayerActionKind::Heal(HealAction))
    }

    pub fn transit(kind: TransitActionKind) -> Self {
        Self::Transit(kind)
    }

    /// Short stable label, used in logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Player(PlayerActionKind::Attack(_)) => "attack",
            Action::Player(PlayerActionKind::Heal(_)) => "heal",
            Action::Transit(TransitActionKind::Travel(_)) => "travel",
            Action::Transit(TransitActionKind::BeginDiscovery(_)) => "begin_discovery",
            Action::Transit(TransitActionKind::CommitDiscovery(_)) => "commit_discovery",
            Action::Transit(TransitActionKind::AbortDiscovery(_)) => "abort_discovery",
        }
    }
}

/// Action-specific execution result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Attack(AttackOutcome),
    Heal(HealOutcome),
    Travelled { to: RealmId },
    DiscoveryStarted(PendingDiscovery),
    RealmDiscovered(DiscoveredRealm),
    DiscoveryAborted(PendingDiscovery),
}
