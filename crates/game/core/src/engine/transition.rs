//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition, PlayerActionKind, TransitActionKind};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Player(kind) => match kind {
            PlayerActionKind::Attack(transition) => {
                let outcome =
                    drive_transition(transition, state, env).map_err(ExecuteError::Attack)?;
                Ok(ActionResult::Attack(outcome))
            }
            PlayerActionKind::Heal(transition) => {
                let outcome =
                    drive_transition(transition, state, env).map_err(ExecuteError::Heal)?;
                Ok(ActionResult::Heal(outcome))
            }
        },
        Action::Transit(kind) => match kind {
            TransitActionKind::Travel(transition) => {
                let to = drive_transition(transition, state, env).map_err(ExecuteError::Travel)?;
                Ok(ActionResult::Travelled { to })
            }
            TransitActionKind::BeginDiscovery(transition) => {
                let pending = drive_transition(transition, state, env)
                    .map_err(ExecuteError::BeginDiscovery)?;
                Ok(ActionResult::DiscoveryStarted(pending))
            }
            TransitActionKind::CommitDiscovery(transition) => {
                let found = drive_transition(transition, state, env)
                    .map_err(ExecuteError::CommitDiscovery)?;
                Ok(ActionResult::RealmDiscovered(found))
            }
            TransitActionKind::AbortDiscovery(transition) => {
                let released = drive_transition(transition, state, env)
                    .map_err(ExecuteError::AbortDiscovery)?;
                Ok(ActionResult::DiscoveryAborted(released))
            }
        },
    }
}
