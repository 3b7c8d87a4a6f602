//! Travel through an already-registered connector.

use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ConnectorId, GameState, RealmId};

use super::ActionTransition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelAction {
    pub connector: ConnectorId,
}

impl TravelAction {
    pub fn new(connector: ConnectorId) -> Self {
        Self { connector }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TravelError {
    #[error("current realm {0} is missing from the store")]
    RealmMissing(RealmId),

    #[error("connector {0} does not exist in the current realm")]
    ConnectorNotFound(ConnectorId),

    #[error("connector {0} leads nowhere yet")]
    NotRegistered(ConnectorId),

    #[error("connector {connector} targets unknown realm {target}")]
    TargetMissing {
        connector: ConnectorId,
        target: RealmId,
    },

    #[error("travel needs {required} stamina, only {available:.1} available")]
    Exhausted { required: f64, available: f64 },
}

impl GameError for TravelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TravelError::Exhausted { .. } => ErrorSeverity::Recoverable,
            TravelError::ConnectorNotFound(_) | TravelError::NotRegistered(_) => {
                ErrorSeverity::Validation
            }
            TravelError::RealmMissing(_) | TravelError::TargetMissing { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TravelError::RealmMissing(_) => "TRAVEL_REALM_MISSING",
            TravelError::ConnectorNotFound(_) => "TRAVEL_CONNECTOR_NOT_FOUND",
            TravelError::NotRegistered(_) => "TRAVEL_NOT_REGISTERED",
            TravelError::TargetMissing { .. } => "TRAVEL_TARGET_MISSING",
            TravelError::Exhausted { .. } => "TRAVEL_EXHAUSTED",
        }
    }
}

impl TravelAction {
    fn destination(&self, state: &GameState) -> Result<RealmId, TravelError> {
        let realm_id = state.player.current_realm;
        let realm = state
            .realm(realm_id)
            .ok_or(TravelError::RealmMissing(realm_id))?;
        let connector = realm
            .connector(self.connector)
            .ok_or(TravelError::ConnectorNotFound(self.connector))?;
        let target = connector
            .target()
            .ok_or(TravelError::NotRegistered(self.connector))?;

        if !state.realms.contains(target) {
            return Err(TravelError::TargetMissing {
                connector: self.connector,
                target,
            });
        }
        Ok(target)
    }
}

impl ActionTransition for TravelAction {
    type Error = TravelError;
    type Result = RealmId;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.destination(state)?;

        let cost = env.config().travel_cost;
        if !state.player.can_afford(cost) {
            return Err(TravelError::Exhausted {
                required: cost,
                available: state.player.stamina,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let config = env.config();
        let target = self.destination(state)?;
        let name = state
            .realm(target)
            .map(|realm| realm.name.clone())
            .unwrap_or_default();
        let stamina = state.player.stamina - config.travel_cost;

        let mut reducer = StateReducer::new(state);
        let mut player = reducer.player();
        player.relocate(target, config.spawn_point());
        player.set_stamina(stamina);
        reducer
            .log()
            .push(format!("Successfully ventured into {name}"));

        Ok(target)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let current = state.player.current_realm;
        if !state.realms.contains(current) {
            return Err(TravelError::RealmMissing(current));
        }
        Ok(())
    }
}
