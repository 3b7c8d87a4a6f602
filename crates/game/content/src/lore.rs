//! Biome word lists for locally composed realm names and descriptions.
//!
//! The runtime falls back to these lists whenever the remote text service is
//! unavailable, so every realm still gets a usable name.

use std::collections::HashMap;

use game_core::{BiomeKind, RealmDetails};

/// Word lists for one biome. A name is `"{prefix} {suffix}"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomeLore {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub descriptions: Vec<String>,
}

impl BiomeLore {
    pub fn is_complete(&self) -> bool {
        !self.prefixes.is_empty() && !self.suffixes.is_empty() && !self.descriptions.is_empty()
    }

    /// Composes realm details. `pick(len)` must return an index below `len`;
    /// out-of-range picks wrap around.
    ///
    /// Returns `None` when any list is empty.
    pub fn compose(&self, mut pick: impl FnMut(usize) -> usize) -> Option<RealmDetails> {
        let prefix = choose(&self.prefixes, &mut pick)?;
        let suffix = choose(&self.suffixes, &mut pick)?;
        let description = choose(&self.descriptions, &mut pick)?;
        Some(RealmDetails::new(format!("{prefix} {suffix}"), description))
    }
}

fn choose<'a>(words: &'a [String], pick: &mut impl FnMut(usize) -> usize) -> Option<&'a str> {
    if words.is_empty() {
        return None;
    }
    let index = pick(words.len()) % words.len();
    words.get(index).map(String::as_str)
}

/// Lore for every biome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoreTable {
    pub biomes: HashMap<BiomeKind, BiomeLore>,
}

impl LoreTable {
    /// Biome used when a table has no entry for the requested biome.
    pub const FALLBACK_BIOME: BiomeKind = BiomeKind::Forest;

    /// Lore for `biome`, or the forest lists when that biome is missing.
    pub fn get(&self, biome: BiomeKind) -> Option<&BiomeLore> {
        self.biomes
            .get(&biome)
            .filter(|lore| lore.is_complete())
            .or_else(|| self.biomes.get(&Self::FALLBACK_BIOME))
    }

    /// Biomes whose lists are missing or have an empty list.
    pub fn incomplete_biomes(&self) -> Vec<BiomeKind> {
        use strum::IntoEnumIterator;

        BiomeKind::iter()
            .filter(|biome| !self.biomes.get(biome).is_some_and(BiomeLore::is_complete))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn compose_joins_prefix_and_suffix() {
        let lore = BiomeLore {
            prefixes: words(&["Ashen", "Molten"]),
            suffixes: words(&["Crags", "Peak"]),
            descriptions: words(&["Hot."]),
        };

        let mut picks = [1, 0, 0].into_iter();
        let details = lore.compose(|_| picks.next().unwrap_or(0)).unwrap();
        assert_eq!(details.name, "Molten Crags");
        assert_eq!(details.description, "Hot.");
    }

    #[test]
    fn compose_wraps_out_of_range_picks() {
        let lore = BiomeLore {
            prefixes: words(&["A"]),
            suffixes: words(&["B"]),
            descriptions: words(&["C"]),
        };
        let details = lore.compose(|len| len + 7).unwrap();
        assert_eq!(details.name, "A B");
    }

    #[test]
    fn missing_biome_falls_back_to_forest() {
        let forest = BiomeLore {
            prefixes: words(&["Emerald"]),
            suffixes: words(&["Grove"]),
            descriptions: words(&["Green."]),
        };
        let table = LoreTable {
            biomes: HashMap::from([(BiomeKind::Forest, forest.clone())]),
        };

        assert_eq!(table.get(BiomeKind::Ruins), Some(&forest));
        assert_eq!(table.incomplete_biomes().len(), 4);
    }
}
