//! Error classification shared by every rule in game-core.
//!
//! Each action keeps its own error enum next to its validation code
//! (`AttackError`, `HealError`, ...). They all report a severity and a stable
//! code so the runtime can log and publish them uniformly.

/// How a rejected action or tick should be treated by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Retrying later may succeed: stamina regenerates, mobs wander into range.
    Recoverable,

    /// The request itself is wrong, e.g. a connector from another realm.
    Validation,

    /// The state broke an invariant the engine maintains, such as the current
    /// realm missing from the store.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Implemented by every error game-core can return.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs, events and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
