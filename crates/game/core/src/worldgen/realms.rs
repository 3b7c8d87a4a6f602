use crate::env::GameEnv;
use crate::state::{
    BiomeKind, EntityId, IdAllocator, Realm, RealmDetails, RealmId, RealmStats,
};

use super::{generate_connector, spawn_mobs};

pub const HOME_REALM_NAME: &str = "Sanctuary of Shadows";
pub const HOME_REALM_DESCRIPTION: &str =
    "The first flicker of light in a long, dark night. Your journey begins here.";

/// Structural inputs for a discovered realm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RealmBlueprint {
    pub id: RealmId,
    pub level: u32,
    pub biome: BiomeKind,
    pub details: RealmDetails,
    /// Realm the discoverer departed from; connector 0 links back to it.
    pub origin: RealmId,
}

/// Builds the home realm: level 1, a single connector, no entities.
pub fn create_initial_realm(
    env: &GameEnv<'_>,
    ids: &mut IdAllocator,
    seed: u64,
    owner: EntityId,
) -> Realm {
    let id = ids.realm();
    let connector = generate_connector(env, seed, ids.connector(), 0, 1);

    Realm {
        id,
        name: HOME_REALM_NAME.to_string(),
        description: HOME_REALM_DESCRIPTION.to_string(),
        level: 1,
        stats: RealmStats::for_level(1),
        connectors: vec![connector],
        entities: Vec::new(),
        owner: Some(owner),
        is_home: true,
        biome: BiomeKind::Forest,
    }
}

/// Builds a discovered realm from its blueprint.
///
/// The realm gets one connector per level and a fresh mob population.
/// Connector 0 is registered towards `blueprint.origin` so every discovered
/// realm has an immediate way back.
pub fn generate_realm(
    env: &GameEnv<'_>,
    ids: &mut IdAllocator,
    seed: u64,
    blueprint: RealmBlueprint,
) -> Realm {
    let RealmBlueprint {
        id,
        level,
        biome,
        details,
        origin,
    } = blueprint;

    let total = level.max(1);
    let mut connectors: Vec<_> = (0..total)
        .map(|index| generate_connector(env, seed, ids.connector(), index, total))
        .collect();
    if let Some(back_link) = connectors.first_mut() {
        back_link.link(origin);
    }

    Realm {
        id,
        name: details.name,
        description: details.description,
        level: total,
        stats: RealmStats::for_level(total),
        connectors,
        entities: spawn_mobs(env, ids, seed, total),
        owner: None,
        is_home: false,
        biome,
    }
}
