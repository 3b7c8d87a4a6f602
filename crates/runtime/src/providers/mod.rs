//! Realm-details provider implementations.
//!
//! - [`LocalLoreProvider`] composes names from biome word lists
//! - [`LlmDetailsProvider`] asks a remote LLM
//! - [`ResilientProvider`] retries a primary provider and falls back to lore

pub mod llm;
pub mod lore;
pub mod resilient;

pub use llm::{ApiFormat, LlmConfig, LlmDetailsProvider};
pub use lore::LocalLoreProvider;
pub use resilient::{ResilientProvider, RetryPolicy};
