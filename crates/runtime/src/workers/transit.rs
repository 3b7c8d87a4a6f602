//! Transit worker that resolves pending discoveries off the simulation loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use game_core::{PendingDiscovery, RealmDetails};

use crate::api::RealmDetailsProvider;

/// Provider answer for one pending discovery. An error carries the reason the
/// discovery should be aborted.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub pending: PendingDiscovery,
    pub details: Result<RealmDetails, String>,
}

/// Calls the provider for every discovery request, one at a time.
///
/// The in-flight guard lives in the game state, so at most one request is
/// ever queued here.
pub(crate) struct TransitWorker {
    provider: Arc<dyn RealmDetailsProvider>,
    request_rx: mpsc::Receiver<PendingDiscovery>,
    resolution_tx: mpsc::Sender<Resolution>,
}

impl TransitWorker {
    pub(crate) fn new(
        provider: Arc<dyn RealmDetailsProvider>,
        request_rx: mpsc::Receiver<PendingDiscovery>,
        resolution_tx: mpsc::Sender<Resolution>,
    ) -> Self {
        Self {
            provider,
            request_rx,
            resolution_tx,
        }
    }

    /// Runs until the simulation worker drops its request sender.
    pub(crate) async fn run(mut self) {
        while let Some(pending) = self.request_rx.recv().await {
            let details = self
                .provider
                .realm_details(pending.level, pending.biome)
                .await
                .map_err(|error| {
                    warn!(
                        target: "runtime::transit",
                        level = pending.level,
                        biome = %pending.biome,
                        %error,
                        "realm details unavailable"
                    );
                    error.to_string()
                });

            if self
                .resolution_tx
                .send(Resolution { pending, details })
                .await
                .is_err()
            {
                break;
            }
        }
        debug!(target: "runtime::transit", "transit worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FixedDetailsProvider;
    use game_core::{BiomeKind, ConnectorId, RealmId};

    #[tokio::test]
    async fn answers_each_request_with_provider_details() {
        let provider = Arc::new(FixedDetailsProvider::new(RealmDetails::new(
            "Ashen Gate",
            "Smoke.",
        )));
        let (request_tx, request_rx) = mpsc::channel(1);
        let (resolution_tx, mut resolution_rx) = mpsc::channel(1);
        let worker = tokio::spawn(TransitWorker::new(provider, request_rx, resolution_tx).run());

        let pending = PendingDiscovery {
            origin: RealmId(1),
            connector: ConnectorId(2),
            level: 2,
            biome: BiomeKind::Volcanic,
        };
        request_tx.send(pending).await.unwrap();

        let resolution = resolution_rx.recv().await.unwrap();
        assert_eq!(resolution.pending, pending);
        assert_eq!(resolution.details.unwrap().name, "Ashen Gate");

        drop(request_tx);
        worker.await.unwrap();
    }
}
