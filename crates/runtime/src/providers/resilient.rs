//! Retry and fallback composition around a primary provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use game_core::{BiomeKind, RealmDetails};

use super::LocalLoreProvider;
use crate::api::{ProviderError, RealmDetailsProvider};

/// Bounded retry with linear backoff: attempt `n` (1-based) waits
/// `backoff_base * n` before retrying.
///
/// A server `Retry-After` hint may lengthen a wait, but never past the last
/// linear step, so a pending discovery is held for a bounded time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
        }
    }

    /// Same retry count, no waiting. Intended for tests.
    pub const fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, Duration::ZERO)
    }

    pub fn delay(&self, retry: u32) -> Duration {
        self.backoff_base * retry
    }

    /// Wait before retry `retry`, honoring a server hint up to
    /// [`max_delay`](Self::max_delay).
    pub fn delay_with_hint(&self, retry: u32, hint: Option<Duration>) -> Duration {
        let linear = self.delay(retry);
        hint.map_or(linear, |hint| hint.clamp(linear, self.max_delay().max(linear)))
    }

    /// Longest wait the policy ever schedules.
    pub fn max_delay(&self) -> Duration {
        self.delay(self.max_retries)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

/// Asks the primary provider, retrying transient failures, and falls back to
/// local lore when it gives up. Never returns an error.
pub struct ResilientProvider {
    primary: Arc<dyn RealmDetailsProvider>,
    fallback: LocalLoreProvider,
    policy: RetryPolicy,
}

impl ResilientProvider {
    pub fn new(
        primary: Arc<dyn RealmDetailsProvider>,
        fallback: LocalLoreProvider,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            primary,
            fallback,
            policy,
        }
    }
}

#[async_trait]
impl RealmDetailsProvider for ResilientProvider {
    async fn realm_details(
        &self,
        level: u32,
        biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError> {
        let mut retry = 0;
        loop {
            let error = match self.primary.realm_details(level, biome).await {
                Ok(details) => return Ok(details),
                Err(error) => error,
            };

            if !error.is_transient() || retry >= self.policy.max_retries {
                warn!(
                    target: "runtime::providers",
                    %error,
                    retries = retry,
                    %biome,
                    "Text service failed, using local lore"
                );
                return Ok(self.fallback.compose(biome));
            }

            retry += 1;
            let hint = match &error {
                ProviderError::RateLimited { retry_after } => *retry_after,
                _ => None,
            };
            let delay = self.policy.delay_with_hint(retry, hint);
            warn!(
                target: "runtime::providers",
                %error,
                retry,
                delay_ms = delay.as_millis() as u64,
                "Text service request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use game_content::LoreLoader;

    /// Fails `failures` times with the given error factory, then succeeds.
    struct Flaky {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> ProviderError,
    }

    #[async_trait]
    impl RealmDetailsProvider for Flaky {
        async fn realm_details(
            &self,
            _level: u32,
            _biome: BiomeKind,
        ) -> Result<RealmDetails, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err((self.error)());
            }
            Ok(RealmDetails::new("Remote Realm", "From afar."))
        }
    }

    fn rate_limited() -> ProviderError {
        ProviderError::RateLimited { retry_after: None }
    }

    fn malformed() -> ProviderError {
        ProviderError::Malformed("not json".into())
    }

    fn resilient(primary: Arc<Flaky>) -> ResilientProvider {
        let fallback = LocalLoreProvider::new(LoreLoader::builtin().unwrap(), 3);
        ResilientProvider::new(primary, fallback, RetryPolicy::immediate(2))
    }

    #[test]
    fn backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_secs(1));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
    }

    #[test]
    fn server_hints_are_capped_at_the_last_step() {
        let policy = RetryPolicy::default();
        let hour = Some(Duration::from_secs(3600));
        assert_eq!(policy.delay_with_hint(1, hour), Duration::from_secs(2));
        assert_eq!(policy.delay_with_hint(2, hour), Duration::from_secs(2));
        assert_eq!(
            policy.delay_with_hint(1, Some(Duration::from_millis(1500))),
            Duration::from_millis(1500)
        );
        assert_eq!(
            policy.delay_with_hint(2, Some(Duration::from_millis(10))),
            Duration::from_secs(2)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn long_retry_after_does_not_stall_the_discovery() {
        let primary = Arc::new(Flaky {
            calls: AtomicU32::new(0),
            failures: u32::MAX,
            error: || ProviderError::RateLimited {
                retry_after: Some(Duration::from_secs(3600)),
            },
        });
        let fallback = LocalLoreProvider::new(LoreLoader::builtin().unwrap(), 3);
        let provider = ResilientProvider::new(primary.clone(), fallback, RetryPolicy::default());

        let started = tokio::time::Instant::now();
        let details = provider.realm_details(2, BiomeKind::Mystic).await.unwrap();

        assert!(!details.name.is_empty());
        assert_eq!(primary.calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn recovers_within_retry_budget() {
        let primary = Arc::new(Flaky {
            calls: AtomicU32::new(0),
            failures: 2,
            error: rate_limited,
        });
        let details = resilient(primary.clone())
            .realm_details(2, BiomeKind::Forest)
            .await
            .unwrap();

        assert_eq!(details.name, "Remote Realm");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn falls_back_after_exhausting_retries() {
        let primary = Arc::new(Flaky {
            calls: AtomicU32::new(0),
            failures: u32::MAX,
            error: rate_limited,
        });
        let details = resilient(primary.clone())
            .realm_details(2, BiomeKind::Ruins)
            .await
            .unwrap();

        assert_ne!(details.name, "Remote Realm");
        assert!(!details.name.is_empty());
        assert!(!details.description.is_empty());
        // One initial attempt plus two retries.
        assert_eq!(primary.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_errors_fall_back_without_retrying() {
        let primary = Arc::new(Flaky {
            calls: AtomicU32::new(0),
            failures: u32::MAX,
            error: malformed,
        });
        resilient(primary.clone())
            .realm_details(3, BiomeKind::Desert)
            .await
            .unwrap();

        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }
}
