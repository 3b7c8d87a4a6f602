//! Realmwalk client binary.
//!
//! Composition root that assembles:
//! 1. Content (game config and lore) from an optional data directory
//! 2. Runtime (game logic) via RuntimeBuilder, with a remote text service when
//!    an API key is configured
//! 3. A headless autopilot standing in for keyboard input and rendering
//!
//! # Examples
//!
//! ```bash
//! REALMWALK_SEED=7 REALMWALK_DURATION_SECS=30 cargo run -p realmwalk-client
//! ```

mod autopilot;
mod config;
mod logging;

use anyhow::Result;
use tracing::{info, warn};

use game_content::{ContentFactory, LoreLoader};
use game_core::GameConfig;
use runtime::{LlmDetailsProvider, Runtime, RuntimeConfig};

use autopilot::Autopilot;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    info!("Starting realmwalk");

    let factory = config.data_dir.clone().map(ContentFactory::new);
    let (game_config, lore) = match &factory {
        Some(factory) => {
            info!("Content directory: {}", factory.data_dir().display());
            (factory.load_config()?, factory.load_lore()?)
        }
        None => (GameConfig::default(), LoreLoader::builtin()?),
    };

    let mut runtime_config = RuntimeConfig {
        game_config: game_config.clone(),
        seed: config.seed,
        ..RuntimeConfig::default()
    };
    if let Some(name) = config.player_name.clone() {
        runtime_config.player_name = name;
    }

    let mut builder = Runtime::builder().config(runtime_config).lore(lore);
    match config.llm.clone().map(LlmDetailsProvider::new) {
        Some(Ok(provider)) => {
            info!("Remote realm names: {:?} API", provider.format());
            builder = builder.details_provider(provider);
        }
        Some(Err(error)) => {
            warn!("Remote text service unavailable: {error}. Using local lore.");
        }
        None => info!("No LLM_API_KEY set; realm names come from local lore"),
    }

    let runtime = builder.build().await?;
    info!("Session seed: {}", runtime.seed());

    let autopilot = Autopilot::new(runtime.handle(), game_config).run();
    match config.duration {
        Some(duration) => {
            if let Ok(result) = tokio::time::timeout(duration, autopilot).await {
                result?;
            }
        }
        None => {
            tokio::select! {
                result = autopilot => result?,
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            }
        }
    }

    runtime.shutdown().await?;
    info!("Client shutdown complete");
    Ok(())
}
