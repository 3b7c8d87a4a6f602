//! Error types for the action pipeline and the simulation tick.

use crate::action::{
    AbortDiscoveryAction, ActionTransition, AttackAction, BeginDiscoveryAction,
    CommitDiscoveryAction, HealAction, TravelAction,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{RealmId, StoreError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("heal action failed: {0}")]
    Heal(TransitionPhaseError<<HealAction as ActionTransition>::Error>),

    #[error("travel action failed: {0}")]
    Travel(TransitionPhaseError<<TravelAction as ActionTransition>::Error>),

    #[error("begin discovery action failed: {0}")]
    BeginDiscovery(TransitionPhaseError<<BeginDiscoveryAction as ActionTransition>::Error>),

    #[error("commit discovery action failed: {0}")]
    CommitDiscovery(TransitionPhaseError<<CommitDiscoveryAction as ActionTransition>::Error>),

    #[error("abort discovery action failed: {0}")]
    AbortDiscovery(TransitionPhaseError<<AbortDiscoveryAction as ActionTransition>::Error>),
}

impl ExecuteError {
    /// Phase of the pipeline that rejected the action.
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Attack(e) => e.phase,
            ExecuteError::Heal(e) => e.phase,
            ExecuteError::Travel(e) => e.phase,
            ExecuteError::BeginDiscovery(e) => e.phase,
            ExecuteError::CommitDiscovery(e) => e.phase,
            ExecuteError::AbortDiscovery(e) => e.phase,
        }
    }

    fn inner(&self) -> &dyn GameError {
        match self {
            ExecuteError::Attack(e) => &e.error,
            ExecuteError::Heal(e) => &e.error,
            ExecuteError::Travel(e) => &e.error,
            ExecuteError::BeginDiscovery(e) => &e.error,
            ExecuteError::CommitDiscovery(e) => &e.error,
            ExecuteError::AbortDiscovery(e) => &e.error,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        // A post-condition failure means apply produced an inconsistent state.
        if self.phase() == TransitionPhase::PostValidate {
            return ErrorSeverity::Internal;
        }
        self.inner().severity()
    }

    fn error_code(&self) -> &'static str {
        self.inner().error_code()
    }
}

/// Errors surfaced by [`GameEngine::tick`](super::GameEngine::tick).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("realm {0} is missing from the store")]
    RealmMissing(RealmId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError for TickError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            TickError::RealmMissing(_) => "TICK_REALM_MISSING",
            TickError::Store(inner) => inner.error_code(),
        }
    }
}
