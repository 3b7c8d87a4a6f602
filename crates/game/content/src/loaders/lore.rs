//! Lore table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::lore::LoreTable;

const BUILTIN_LORE: &str = include_str!("../../data/lore.ron");

/// Loader for biome word lists from RON files.
pub struct LoreLoader;

impl LoreLoader {
    /// The word lists bundled with the crate.
    pub fn builtin() -> LoadResult<LoreTable> {
        Self::parse(BUILTIN_LORE)
    }

    pub fn load(path: &Path) -> LoadResult<LoreTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a lore table. The forest lists are mandatory since every other
    /// biome falls back to them.
    pub fn parse(content: &str) -> LoadResult<LoreTable> {
        let table: LoreTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse lore RON: {}", e))?;

        if !table
            .biomes
            .get(&LoreTable::FALLBACK_BIOME)
            .is_some_and(|lore| lore.is_complete())
        {
            anyhow::bail!(
                "lore table must define non-empty {} word lists",
                LoreTable::FALLBACK_BIOME
            );
        }
        Ok(table)
    }
}
