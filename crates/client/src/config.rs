//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::LlmConfig;

/// Settings for one headless session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `lore.ron` overrides.
    pub data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub player_name: Option<String>,
    /// Stop after this long; run until Ctrl-C when unset.
    pub duration: Option<Duration>,
    /// Write logs here in addition to stderr.
    pub log_dir: Option<PathBuf>,
    /// Remote text service. Local lore only when absent.
    pub llm: Option<LlmConfig>,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REALMWALK_DATA_DIR` - content directory
    /// - `REALMWALK_SEED` - session seed (random when unset)
    /// - `REALMWALK_PLAYER_NAME` - player name
    /// - `REALMWALK_DURATION_SECS` - session length in seconds
    /// - `REALMWALK_LOG_DIR` - log file directory
    /// - `LLM_API_KEY`, `LLM_API_URL`, `LLM_MODEL` - remote text service
    pub fn from_env() -> Self {
        let llm = read_env::<String>("LLM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                let mut llm = LlmConfig::new(key);
                if let Some(url) = read_env::<String>("LLM_API_URL") {
                    llm = llm.with_api_url(url);
                }
                if let Some(model) = read_env::<String>("LLM_MODEL") {
                    llm = llm.with_model(model);
                }
                llm
            });

        Self {
            data_dir: read_env("REALMWALK_DATA_DIR"),
            seed: read_env("REALMWALK_SEED"),
            player_name: read_env("REALMWALK_PLAYER_NAME"),
            duration: read_env("REALMWALK_DURATION_SECS").map(Duration::from_secs),
            log_dir: read_env("REALMWALK_LOG_DIR"),
            llm,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
