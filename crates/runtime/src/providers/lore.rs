//! Offline realm names from biome word lists.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_content::LoreTable;
use game_core::{BiomeKind, RealmDetails};

use crate::api::{ProviderError, RealmDetailsProvider};

/// Composes `"{prefix} {suffix}"` names and picks a description at random.
///
/// Never fails; a table without usable lists yields a generic name.
pub struct LocalLoreProvider {
    table: LoreTable,
    rng: Mutex<StdRng>,
}

impl LocalLoreProvider {
    pub fn new(table: LoreTable, seed: u64) -> Self {
        Self {
            table,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn compose(&self, biome: BiomeKind) -> RealmDetails {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.table
            .get(biome)
            .and_then(|lore| lore.compose(|len| rng.gen_range(0..len)))
            .unwrap_or_else(|| {
                RealmDetails::new(
                    format!("Uncharted {biome}"),
                    "No tale has been told of this place yet.",
                )
            })
    }
}

#[async_trait]
impl RealmDetailsProvider for LocalLoreProvider {
    async fn realm_details(
        &self,
        _level: u32,
        biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError> {
        Ok(self.compose(biome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::LoreLoader;

    #[test]
    fn names_come_from_the_biome_lists() {
        let table = LoreLoader::builtin().unwrap();
        let volcanic = table.get(BiomeKind::Volcanic).unwrap().clone();
        let provider = LocalLoreProvider::new(table, 42);

        for _ in 0..20 {
            let details = provider.compose(BiomeKind::Volcanic);
            let (prefix, suffix) = details.name.split_once(' ').unwrap();
            assert!(volcanic.prefixes.iter().any(|p| p == prefix));
            assert!(volcanic.suffixes.iter().any(|s| s == suffix));
            assert!(volcanic.descriptions.contains(&details.description));
        }
    }

    #[test]
    fn same_seed_same_names() {
        let table = LoreLoader::builtin().unwrap();
        let a = LocalLoreProvider::new(table.clone(), 7);
        let b = LocalLoreProvider::new(table, 7);

        for biome in [BiomeKind::Forest, BiomeKind::Ruins, BiomeKind::Mystic] {
            assert_eq!(a.compose(biome), b.compose(biome));
        }
    }

    #[test]
    fn empty_table_still_names_the_realm() {
        let provider = LocalLoreProvider::new(LoreTable::default(), 1);
        let details = provider.compose(BiomeKind::Desert);
        assert_eq!(details.name, "Uncharted Desert");
        assert!(!details.description.is_empty());
    }
}
