//! Action execution pipeline and the fixed-step simulation.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Discrete
//! actions flow through the three-phase transition pipeline; continuous
//! movement, mob AI and regeneration advance through [`GameEngine::tick`].

mod errors;
mod reducer;
mod tick;
mod transition;

pub use errors::{ExecuteError, TickError, TransitionPhase, TransitionPhaseError};
pub use reducer::{
    LogReducer, PlayerReducer, RealmsReducer, StateReducer, TransitReducer,
};
pub use tick::{ConnectorOutcome, DEFEAT_MESSAGE, TickInput, TickOutcome};

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::state::GameState;

/// Game engine that applies actions and advances the simulation.
///
/// Actions run on a staged copy of the state. The borrowed state is replaced
/// only when every phase succeeds, so a rejected action is a no-op. Cloning is
/// cheap because realms are shared behind `Arc`.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes an action through the transition pipeline.
    ///
    /// The action nonce increments after every successful execution.
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<ActionResult, ExecuteError> {
        self.staged(|state| transition::execute_transition(action, state, env))
    }

    fn staged<R>(
        &mut self,
        run: impl FnOnce(&mut GameState) -> Result<R, ExecuteError>,
    ) -> Result<R, ExecuteError> {
        let mut staged = self.state.clone();
        let result = run(&mut staged)?;
        staged.nonce += 1;
        *self.state = staged;
        Ok(result)
    }
}
