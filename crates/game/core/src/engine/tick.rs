//! Fixed-step simulation and connector hand-off.

use crate::action::{BeginDiscoveryAction, EXHAUSTED_MESSAGE, TravelAction, TravelError};
use crate::env::GameEnv;
use crate::geometry::{MoveInput, Point, clamp_to_realm};
use crate::state::{ConnectorId, GameEntity, PendingDiscovery, RealmId, Timestamp};

use super::errors::{ExecuteError, TickError, TransitionPhase, TransitionPhaseError};
use super::transition::drive_transition;
use super::{GameEngine, StateReducer};

pub const DEFEAT_MESSAGE: &str = "Defeated! You awake back at your sanctuary.";

/// Input sampled for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    pub movement: MoveInput,
    /// Logical clock; drives mob attack cooldowns.
    pub now: Timestamp,
}

impl TickInput {
    pub fn new(movement: MoveInput, now: Timestamp) -> Self {
        Self { movement, now }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Movement, mob AI and regeneration were committed.
    Advanced { hits: u32, damage_taken: f64 },
    /// A discovery departing from the player's realm is in flight; nothing changed.
    Suspended,
    /// The proposed position touches a connector. Nothing changed; the caller
    /// hands off to [`GameEngine::reach_connector`].
    ConnectorReached { connector: ConnectorId },
    /// The player died and woke up at home.
    Respawned { defeated_in: RealmId },
}

/// Result of handing a touched connector to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectorOutcome {
    /// Not enough stamina; a log line was appended and nothing else changed.
    Exhausted,
    Travelled { to: RealmId },
    /// The connector was unregistered; flavor text must now be fetched.
    DiscoveryStarted(PendingDiscovery),
    /// Another discovery is already in flight.
    AlreadyPending(PendingDiscovery),
}

/// Simulation methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Advances the simulation by one fixed step.
    ///
    /// Steps, in order: movement, connector detection, mob seek, mob attacks,
    /// regeneration, then either respawn or commit. Seek and attack distances
    /// are measured from the player's position before this tick's movement.
    pub fn tick(&mut self, env: &GameEnv<'_>, input: TickInput) -> Result<TickOutcome, TickError> {
        let config = env.config();
        let realm_id = self.state.player.current_realm;

        if self.state.transit.suspends(realm_id) {
            return Ok(TickOutcome::Suspended);
        }

        let realm = self
            .state
            .realm(realm_id)
            .ok_or(TickError::RealmMissing(realm_id))?;
        let player = &self.state.player;
        let origin = player.position;

        let proposed = clamp_to_realm(
            Point::new(
                origin.x + input.movement.x() * config.player_speed,
                origin.y + input.movement.y() * config.player_speed,
            ),
            config.realm_size,
            config.entity_radius,
        );

        if let Some(connector) = realm.touching_connector(proposed, config.connector_trigger_radius)
        {
            return Ok(TickOutcome::ConnectorReached {
                connector: connector.id,
            });
        }

        let mut entities = realm.entities.clone();
        seek(&mut entities, origin, env);
        let (hits, damage_taken) = strike(&mut entities, origin, input.now, env);
        let entities_changed = entities != realm.entities;

        let wounded = player.health - damage_taken;
        let stamina = player.stamina;
        let regen = realm.stats.health_regen_bonus / f64::from(config.tick_rate_hz.max(1));

        if wounded <= 0.0 {
            let home = player.home_realm;
            if !self.state.realms.contains(home) {
                return Err(TickError::RealmMissing(home));
            }
            let max_health = player.max_health;

            let mut reducer = StateReducer::new(self.state);
            let mut player = reducer.player();
            player.relocate(home, config.spawn_point());
            player.set_health(max_health);
            player.set_stamina(stamina - config.death_penalty);
            reducer.log().push(DEFEAT_MESSAGE);

            return Ok(TickOutcome::Respawned {
                defeated_in: realm_id,
            });
        }

        let mut reducer = StateReducer::new(self.state);
        if entities_changed {
            reducer.realms().replace_entities(realm_id, entities)?;
        }
        let mut player = reducer.player();
        player.set_position(proposed);
        player.set_health(wounded + regen);
        player.set_stamina(stamina + config.stamina_regen_per_tick);

        Ok(TickOutcome::Advanced { hits, damage_taken })
    }

    /// Resolves a touched connector: travel when it is registered, begin a
    /// discovery when it is not.
    ///
    /// Without enough stamina the exhausted message is logged and nothing else
    /// changes.
    pub fn reach_connector(
        &mut self,
        env: &GameEnv<'_>,
        connector: ConnectorId,
    ) -> Result<ConnectorOutcome, ExecuteError> {
        let realm_id = self.state.player.current_realm;
        let registered = self
            .state
            .realm(realm_id)
            .and_then(|realm| realm.connector(connector))
            .map(|found| found.is_registered())
            .ok_or_else(|| {
                ExecuteError::Travel(TransitionPhaseError::new(
                    TransitionPhase::PreValidate,
                    TravelError::ConnectorNotFound(connector),
                ))
            })?;

        if !self.state.player.can_afford(env.config().travel_cost) {
            StateReducer::new(self.state).log().push(EXHAUSTED_MESSAGE);
            return Ok(ConnectorOutcome::Exhausted);
        }

        if registered {
            let action = TravelAction::new(connector);
            let to = self.staged(|state| {
                drive_transition(&action, state, env).map_err(ExecuteError::Travel)
            })?;
            return Ok(ConnectorOutcome::Travelled { to });
        }

        if let Some(pending) = self.state.transit.pending() {
            return Ok(ConnectorOutcome::AlreadyPending(*pending));
        }

        let action = BeginDiscoveryAction::new(connector);
        let pending = self.staged(|state| {
            drive_transition(&action, state, env).map_err(ExecuteError::BeginDiscovery)
        })?;
        Ok(ConnectorOutcome::DiscoveryStarted(pending))
    }
}

/// Aggressive entities inside the aggro radius close in on `target` until
/// they reach melee range.
fn seek(entities: &mut [GameEntity], target: Point, env: &GameEnv<'_>) {
    let config = env.config();
    for entity in entities.iter_mut().filter(|e| e.is_aggressive) {
        let distance = entity.position.distance(target);
        if distance < config.aggro_radius && distance > config.melee_hold_radius {
            entity.position = entity.position.step_towards(target, config.mob_step);
        }
    }
}

/// Aggressive entities in attack range whose cooldown elapsed hit `target`.
/// Returns the number of hits and the cumulative damage.
fn strike(
    entities: &mut [GameEntity],
    target: Point,
    now: Timestamp,
    env: &GameEnv<'_>,
) -> (u32, f64) {
    let config = env.config();
    let mut hits = 0;
    let mut damage = 0.0;

    for entity in entities.iter_mut().filter(|e| e.is_aggressive) {
        if entity.position.distance(target) < config.mob_attack_radius
            && entity.attack_ready(now, config.mob_attack_cooldown_ms)
        {
            damage += entity.damage.unwrap_or(config.default_mob_damage);
            entity.last_attack = Some(now);
            hits += 1;
        }
    }
    (hits, damage)
}
