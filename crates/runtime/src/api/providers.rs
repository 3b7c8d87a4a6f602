//! Asynchronous abstraction for sourcing realm flavor text.
//!
//! The transit coordinator asks a [`RealmDetailsProvider`] for a name and a
//! description whenever a new realm is discovered. Implementations range from
//! a remote LLM to local word lists or test fixtures.
use async_trait::async_trait;
use game_core::{BiomeKind, RealmDetails};

use super::errors::ProviderError;

/// Trait for providing realm flavor text.
///
/// Different implementations can handle:
/// - Remote text generation (LLM APIs)
/// - Local procedural word lists
/// - Retry and fallback composition
/// - Testing fixtures
#[async_trait]
pub trait RealmDetailsProvider: Send + Sync {
    /// Produce a name and a short description for a realm of `level` and `biome`.
    async fn realm_details(
        &self,
        level: u32,
        biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError>;
}

/// Provider that always answers with the same details.
/// Useful for testing.
pub struct FixedDetailsProvider {
    details: RealmDetails,
}

impl FixedDetailsProvider {
    pub fn new(details: RealmDetails) -> Self {
        Self { details }
    }
}

#[async_trait]
impl RealmDetailsProvider for FixedDetailsProvider {
    async fn realm_details(
        &self,
        _level: u32,
        _biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError> {
        Ok(self.details.clone())
    }
}
