use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

use super::ActionTransition;

/// Trades stamina for health. No cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAction;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HealError {
    #[error("heal needs {required} stamina, only {available:.1} available")]
    InsufficientStamina { required: f64, available: f64 },
}

impl GameError for HealError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            HealError::InsufficientStamina { .. } => "HEAL_INSUFFICIENT_STAMINA",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    /// Health actually gained after clamping to max health.
    pub restored: f64,
}

impl ActionTransition for HealAction {
    type Error = HealError;
    type Result = HealOutcome;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let cost = env.config().heal_cost;
        if !state.player.can_afford(cost) {
            return Err(HealError::InsufficientStamina {
                required: cost,
                available: state.player.stamina,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let config = env.config();
        let before = state.player.health;
        let health = before + config.heal_amount;
        let stamina = state.player.stamina - config.heal_cost;

        let mut reducer = StateReducer::new(state);
        let mut player = reducer.player();
        player.set_health(health);
        player.set_stamina(stamina);

        Ok(HealOutcome {
            restored: state.player.health - before,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::PcgRng;

    #[test]
    fn heal_clamps_to_max_and_spends_stamina() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let mut state = GameState::new_session(1, "Tester", &env);
        state.player.health = 85.0;

        HealAction.pre_validate(&state, &env).unwrap();
        let outcome = HealAction.apply(&mut state, &env).unwrap();

        assert_eq!(outcome.restored, 15.0);
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.player.stamina, 90.0);
    }

    #[test]
    fn heal_rejected_below_cost() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let mut state = GameState::new_session(1, "Tester", &env);
        state.player.stamina = 9.9;

        let result = HealAction.pre_validate(&state, &env);
        assert!(matches!(
            result,
            Err(HealError::InsufficientStamina { .. })
        ));
    }
}
