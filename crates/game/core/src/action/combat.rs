//! Player-initiated melee attack.

use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Point;
use crate::state::{EntityId, GameEntity, GameState, RealmId};

use super::ActionTransition;

/// Strikes the first entity (list order, not nearest) within attack range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AttackError {
    #[error("no entity within {range} units")]
    NoTargetInRange { range: f64 },

    #[error("current realm {0} is missing from the store")]
    RealmMissing(RealmId),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::NoTargetInRange { .. } => ErrorSeverity::Recoverable,
            AttackError::RealmMissing(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::NoTargetInRange { .. } => "ATTACK_NO_TARGET_IN_RANGE",
            AttackError::RealmMissing(_) => "ATTACK_REALM_MISSING",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Damaged { target: EntityId, remaining: f64 },
    Killed { target: EntityId, bounty: u64 },
}

fn target_index(entities: &[GameEntity], origin: Point, range: f64) -> Option<usize> {
    entities
        .iter()
        .position(|entity| entity.position.distance(origin) < range)
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = AttackOutcome;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let realm_id = state.player.current_realm;
        let realm = state
            .realm(realm_id)
            .ok_or(AttackError::RealmMissing(realm_id))?;
        let range = env.config().player_attack_range;

        target_index(&realm.entities, state.player.position, range)
            .map(|_| ())
            .ok_or(AttackError::NoTargetInRange { range })
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let config = env.config();
        let realm_id = state.player.current_realm;
        let realm = state
            .realm(realm_id)
            .ok_or(AttackError::RealmMissing(realm_id))?;

        let index = target_index(&realm.entities, state.player.position, config.player_attack_range)
            .ok_or(AttackError::NoTargetInRange {
                range: config.player_attack_range,
            })?;

        let mut entities = realm.entities.clone();
        let level = realm.level;
        let target = &mut entities[index];
        target.health -= config.player_attack_damage;
        let (target_id, remaining, killed) = (target.id, target.health, target.is_dead());

        let mut reducer = StateReducer::new(state);

        if killed {
            let name = entities.remove(index).name;
            let bounty = config.bounty_per_level * u64::from(level);

            reducer
                .realms()
                .replace_entities(realm_id, entities)
                .map_err(|_| AttackError::RealmMissing(realm_id))?;
            reducer.player().add_resources(bounty);
            reducer
                .log()
                .push(format!("Defeated {name}. Looted resources!"));

            return Ok(AttackOutcome::Killed {
                target: target_id,
                bounty,
            });
        }

        reducer
            .realms()
            .replace_entities(realm_id, entities)
            .map_err(|_| AttackError::RealmMissing(realm_id))?;

        Ok(AttackOutcome::Damaged {
            target: target_id,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::PcgRng;
    use crate::state::EntityKind;

    fn mob(id: u32, position: Point, health: f64) -> GameEntity {
        GameEntity {
            id: EntityId(id),
            kind: EntityKind::Mob,
            position,
            health,
            max_health: 100.0,
            damage: Some(5.0),
            name: format!("Mob {id}"),
            color: "#ef4444".into(),
            is_aggressive: true,
            loot_table: Vec::new(),
            last_attack: None,
        }
    }

    fn state_with(entities: Vec<GameEntity>, env: &GameEnv<'_>) -> GameState {
        let mut state = GameState::new_session(1, "Tester", env);
        let realm = state.player.current_realm;
        state.realms.replace_entities(realm, entities).unwrap();
        state
    }

    #[test]
    fn hits_first_in_list_order_not_nearest() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let center = config.spawn_point();
        let mut state = state_with(
            vec![
                mob(1, Point::new(center.x + 90.0, center.y), 100.0),
                mob(2, Point::new(center.x + 5.0, center.y), 100.0),
            ],
            &env,
        );

        AttackAction.pre_validate(&state, &env).unwrap();
        let outcome = AttackAction.apply(&mut state, &env).unwrap();

        assert_eq!(
            outcome,
            AttackOutcome::Damaged {
                target: EntityId(1),
                remaining: 75.0
            }
        );
        let entities = &state.current_realm().unwrap().entities;
        assert_eq!(entities[0].health, 75.0);
        assert_eq!(entities[1].health, 100.0);
    }

    #[test]
    fn kill_removes_entity_and_pays_bounty() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let center = config.spawn_point();
        let mut state = state_with(
            vec![
                mob(1, Point::new(center.x + 10.0, center.y), 20.0),
                mob(2, Point::new(center.x + 400.0, center.y), 100.0),
            ],
            &env,
        );
        let resources = state.player.resources;

        let outcome = AttackAction.apply(&mut state, &env).unwrap();

        assert_eq!(
            outcome,
            AttackOutcome::Killed {
                target: EntityId(1),
                bounty: 10
            }
        );
        assert_eq!(state.player.resources, resources + 10);
        let entities = &state.current_realm().unwrap().entities;
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, EntityId(2));
        assert_eq!(
            state.discovery_log.last(),
            Some("Defeated Mob 1. Looted resources!")
        );
    }

    #[test]
    fn rejects_when_nothing_in_range() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let center = config.spawn_point();
        let state = state_with(vec![mob(1, Point::new(center.x + 100.0, center.y), 20.0)], &env);

        let result = AttackAction.pre_validate(&state, &env);
        assert!(matches!(result, Err(AttackError::NoTargetInRange { .. })));
    }
}
