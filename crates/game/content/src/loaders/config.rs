//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Keys the file omits keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.min_mobs_per_realm > config.max_mobs_per_realm {
            anyhow::bail!(
                "min_mobs_per_realm ({}) exceeds max_mobs_per_realm ({})",
                config.min_mobs_per_realm,
                config.max_mobs_per_realm
            );
        }
        if config.tick_rate_hz == 0 {
            anyhow::bail!("tick_rate_hz must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("travel_cost = 35.0\ntick_rate_hz = 30\n").unwrap();

        assert_eq!(config.travel_cost, 35.0);
        assert_eq!(config.tick_rate_hz, 30);
        assert_eq!(config.heal_cost, GameConfig::default().heal_cost);
    }

    #[test]
    fn rejects_inverted_mob_range() {
        let result = ConfigLoader::parse("min_mobs_per_realm = 9\nmax_mobs_per_realm = 2\n");
        assert!(result.is_err());
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let config = ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
