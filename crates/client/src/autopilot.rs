//! Headless input source that plays the game on its own.
//!
//! Reacts to every committed snapshot: heals when hurt, swings at mobs in
//! range, otherwise walks to the nearest connector, preferring unexplored
//! ones. New discovery-log lines are printed to stdout.

use tokio::sync::broadcast::error::RecvError;

use game_core::{GameConfig, GameState, MoveInput};
use runtime::{Event, GameStateEvent, RuntimeError, RuntimeHandle, Topic};

/// Health fraction below which the autopilot heals.
const HEAL_THRESHOLD: f64 = 0.4;
/// Minimum ticks between two attacks.
const ATTACK_INTERVAL_TICKS: u64 = 15;
const LOG_TAIL: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    Heal,
    Attack,
    Move(MoveInput),
}

/// Picks the next input for `state`.
pub fn decide(state: &GameState, config: &GameConfig) -> Decision {
    let player = &state.player;
    let Some(realm) = state.current_realm() else {
        return Decision::Move(MoveInput::IDLE);
    };

    if player.health < player.max_health * HEAL_THRESHOLD && player.can_afford(config.heal_cost) {
        return Decision::Heal;
    }

    if realm
        .entities
        .iter()
        .any(|entity| entity.position.distance(player.position) < config.player_attack_range)
    {
        return Decision::Attack;
    }

    // Rest instead of bouncing off connectors while exhausted.
    if !player.can_afford(config.travel_cost) {
        return Decision::Move(MoveInput::IDLE);
    }

    let nearest = |unexplored_only: bool| {
        realm
            .connectors
            .iter()
            .filter(|connector| !unexplored_only || !connector.is_registered())
            .min_by(|a, b| {
                let da = a.position.distance(player.position);
                let db = b.position.distance(player.position);
                da.total_cmp(&db)
            })
    };

    match nearest(true).or_else(|| nearest(false)) {
        Some(connector) => Decision::Move(MoveInput::towards(player.position, connector.position)),
        None => Decision::Move(MoveInput::IDLE),
    }
}

pub struct Autopilot {
    handle: RuntimeHandle,
    config: GameConfig,
}

impl Autopilot {
    pub fn new(handle: RuntimeHandle, config: GameConfig) -> Self {
        Self { handle, config }
    }

    /// Drives the player until the runtime stops publishing.
    pub async fn run(self) -> Result<(), RuntimeError> {
        let mut updates = self.handle.subscribe(Topic::GameState);
        let mut movement = MoveInput::IDLE;
        let mut last_attack: Option<u64> = None;
        let mut log_len = 0;

        loop {
            let (tick, state) = match updates.recv().await {
                Ok(Event::GameState(GameStateEvent::Committed { tick, state, .. })) => (tick, state),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "autopilot lagged behind snapshots");
                    continue;
                }
                Err(RecvError::Closed) => return Ok(()),
            };

            if state.discovery_log.len() != log_len {
                log_len = state.discovery_log.len();
                print_log(&state);
            }

            match decide(&state, &self.config) {
                Decision::Heal => {
                    if let Err(error) = self.handle.heal().await {
                        tracing::debug!(%error, "heal rejected");
                    }
                }
                Decision::Attack => {
                    if last_attack.is_none_or(|at| tick.saturating_sub(at) >= ATTACK_INTERVAL_TICKS) {
                        last_attack = Some(tick);
                        if let Err(error) = self.handle.attack().await {
                            tracing::debug!(%error, "attack rejected");
                        }
                    }
                }
                Decision::Move(input) if input != movement => {
                    movement = input;
                    self.handle.set_movement(input).await?;
                }
                Decision::Move(_) => {}
            }
        }
    }
}

fn print_log(state: &GameState) {
    let realm = state
        .current_realm()
        .map(|realm| format!("{} (level {})", realm.name, realm.level))
        .unwrap_or_default();
    println!(
        "── {realm} │ HP {:.0}/{:.0} │ SP {:.0}/{:.0} │ {} resources",
        state.player.health,
        state.player.max_health,
        state.player.stamina,
        state.player.max_stamina,
        state.player.resources
    );
    for line in state.discovery_log.recent(LOG_TAIL) {
        println!("   {line}");
    }
}
