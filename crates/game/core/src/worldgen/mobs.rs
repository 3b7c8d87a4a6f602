use crate::env::GameEnv;
use crate::geometry::Point;
use crate::state::{EntityKind, GameEntity, IdAllocator};

use super::{CONTEXT_MOB_COUNT, CONTEXT_MOB_X, CONTEXT_MOB_Y, roll};

pub const MOB_NAME: &str = "Corrupted Nomad";
pub const MOB_COLOR: &str = "#ef4444";
pub const MOB_LOOT: [&str; 2] = ["Ancient Scrap", "Dim Soul Gem"];

/// Spawns the hostile population of a freshly generated realm.
///
/// Count is uniform in `[min_mobs_per_realm, max_mobs_per_realm]`, positions
/// are uniform inside the realm inset by `spawn_margin`. Health and damage scale
/// linearly with `realm_level`; every spawned mob is aggressive.
pub fn spawn_mobs(
    env: &GameEnv<'_>,
    ids: &mut IdAllocator,
    seed: u64,
    realm_level: u32,
) -> Vec<GameEntity> {
    let config = env.config();
    let rng = env.rng();

    let count = rng.range(
        roll(seed, 0, CONTEXT_MOB_COUNT),
        config.min_mobs_per_realm,
        config.max_mobs_per_realm,
    );
    let span = (config.realm_size - 2.0 * config.spawn_margin).max(0.0);
    let level = f64::from(realm_level);
    let health = config.mob_health_per_level * level;

    (0..count)
        .map(|_| {
            let id = ids.entity();
            let x = rng.unit(roll(seed, id.0, CONTEXT_MOB_X)) * span + config.spawn_margin;
            let y = rng.unit(roll(seed, id.0, CONTEXT_MOB_Y)) * span + config.spawn_margin;

            GameEntity {
                id,
                kind: EntityKind::Mob,
                position: Point::new(x, y),
                health,
                max_health: health,
                damage: Some(config.mob_damage_per_level * level),
                name: MOB_NAME.to_string(),
                color: MOB_COLOR.to_string(),
                is_aggressive: true,
                loot_table: MOB_LOOT.iter().map(|item| item.to_string()).collect(),
                last_attack: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::PcgRng;

    #[test]
    fn mobs_scale_with_level_and_stay_inset() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);

        for seed in 0..50 {
            let mut ids = IdAllocator::new();
            let mobs = spawn_mobs(&env, &mut ids, seed, 4);

            assert!((3..=7).contains(&mobs.len()));
            for mob in &mobs {
                assert_eq!(mob.health, 200.0);
                assert_eq!(mob.max_health, 200.0);
                assert_eq!(mob.damage, Some(20.0));
                assert!(mob.is_aggressive);
                assert!(mob.last_attack.is_none());
                assert!((100.0..=900.0).contains(&mob.position.x));
                assert!((100.0..=900.0).contains(&mob.position.y));
            }
        }
    }

    #[test]
    fn mob_ids_are_unique() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let mut ids = IdAllocator::new();

        let mut all: Vec<_> = spawn_mobs(&env, &mut ids, 1, 1)
            .into_iter()
            .chain(spawn_mobs(&env, &mut ids, 2, 1))
            .map(|mob| mob.id)
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }
}
