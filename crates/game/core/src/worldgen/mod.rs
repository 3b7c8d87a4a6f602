//! Procedural generation of realm structure.
//!
//! Produces connectors, mob populations and numeric stats. Flavor text is not
//! generated here; it arrives from the runtime's text collaborator as
//! [`RealmDetails`](crate::state::RealmDetails).
mod connectors;
mod mobs;
mod realms;

pub use connectors::generate_connector;
pub use mobs::{MOB_COLOR, MOB_LOOT, MOB_NAME, spawn_mobs};
pub use realms::{
    HOME_REALM_DESCRIPTION, HOME_REALM_NAME, RealmBlueprint, create_initial_realm, generate_realm,
};

use crate::env::compute_seed;

const CONTEXT_CONNECTOR_KIND: u32 = 0;
const CONTEXT_MOB_COUNT: u32 = 1;
const CONTEXT_MOB_X: u32 = 2;
const CONTEXT_MOB_Y: u32 = 3;

/// Derives the seed of one roll from a generation seed.
fn roll(seed: u64, subject: u32, context: u32) -> u64 {
    compute_seed(seed, 0, subject, context)
}
