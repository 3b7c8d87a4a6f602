//! Realm discovery through the runtime: provider hand-off, fallback and abort.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use game_content::LoreLoader;
use game_core::{
    BiomeKind, ConnectorOutcome, EXHAUSTED_MESSAGE, FADED_MESSAGE, GameConfig, GameEngine,
    GameEnv, GameState, PcgRng, RealmDetails, TickOutcome, TransitStatus,
};
use runtime::{
    FixedDetailsProvider, ProviderError, RealmDetailsProvider, Runtime, RuntimeConfig,
    RuntimeHandle, Topic, TransitEvent,
};

use support::*;

/// Always fails with a retryable server error and counts the calls.
struct BrokenProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RealmDetailsProvider for BrokenProvider {
    async fn realm_details(
        &self,
        _level: u32,
        _biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Status {
            status: 503,
            body: "overloaded".into(),
        })
    }
}

#[tokio::test]
async fn crossing_unexplored_connector_creates_linked_level_three_realm() {
    let (state, origin) = level_two_session();
    let connector = state.realm(origin).unwrap().connectors[1].id;
    let registered_before = registered_connectors(&state);
    let realms_before = state.realms.len();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .details_provider(FixedDetailsProvider::new(RealmDetails::new(
            "Glass Hollow",
            "Wind sings through shards.",
        )))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut transit = handle.subscribe(Topic::Transit);

    let outcome = walk_to_connector(&handle, connector).await;
    assert_eq!(outcome, TickOutcome::ConnectorReached { connector });

    let TransitEvent::DiscoveryStarted(pending) = next_transit(&mut transit).await else {
        panic!("expected the discovery to start");
    };
    assert_eq!(pending.origin, origin);
    assert_eq!(pending.level, 3);

    let TransitEvent::RealmDiscovered { realm, name, .. } = next_transit(&mut transit).await
    else {
        panic!("expected a realm to be discovered");
    };
    assert_eq!(name, "Glass Hollow");

    let state = handle.query_state().await.unwrap();
    let discovered = state.realm(realm).unwrap();
    assert_eq!(discovered.level, 3);
    assert_eq!(discovered.connectors.len(), 3);
    assert_eq!(discovered.connectors[0].target(), Some(origin));
    assert_eq!(
        state.realm(origin).unwrap().connector(connector).unwrap().target(),
        Some(realm)
    );
    assert_eq!(state.realms.len(), realms_before + 1);
    assert_eq!(registered_connectors(&state), registered_before + 2);

    assert_eq!(state.player.current_realm, realm);
    assert_eq!(state.player.stamina, 80.0);
    assert!(state.transit.is_idle());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn failing_provider_falls_back_to_local_lore() {
    let (state, origin) = level_two_session();
    let connector = state.realm(origin).unwrap().connectors[1].id;
    let calls = Arc::new(AtomicUsize::new(0));

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .details_provider(BrokenProvider {
            calls: calls.clone(),
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut transit = handle.subscribe(Topic::Transit);

    walk_to_connector(&handle, connector).await;
    let TransitEvent::DiscoveryStarted(pending) = next_transit(&mut transit).await else {
        panic!("expected the discovery to start");
    };
    let TransitEvent::RealmDiscovered { realm, name, .. } = next_transit(&mut transit).await
    else {
        panic!("fallback lore should still create the realm");
    };

    // One attempt plus two retries.
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let lore = LoreLoader::builtin().unwrap();
    let words = lore.get(pending.biome).unwrap();
    let state = handle.query_state().await.unwrap();
    let discovered = state.realm(realm).unwrap();
    assert!(!name.is_empty());
    assert_eq!(discovered.name, name);
    assert!(words.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str())));
    assert!(words.descriptions.contains(&discovered.description));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn provider_failure_without_fallback_aborts_discovery() {
    let (state, origin) = level_two_session();
    let connector = state.realm(origin).unwrap().connectors[1].id;
    let realms_before = state.realms.len();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .raw_details_provider(BrokenProvider {
            calls: Arc::new(AtomicUsize::new(0)),
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut transit = handle.subscribe(Topic::Transit);

    walk_to_connector(&handle, connector).await;
    assert!(matches!(
        next_transit(&mut transit).await,
        TransitEvent::DiscoveryStarted(_)
    ));
    let TransitEvent::DiscoveryAborted { pending, .. } = next_transit(&mut transit).await else {
        panic!("expected the discovery to be aborted");
    };
    assert_eq!(pending.connector, connector);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.transit, TransitStatus::Idle);
    assert_eq!(state.realms.len(), realms_before);
    assert_eq!(state.player.current_realm, origin);
    assert!(
        !state
            .realm(origin)
            .unwrap()
            .connector(connector)
            .unwrap()
            .is_registered()
    );
    assert_eq!(state.discovery_log.last(), Some(FADED_MESSAGE));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn exhausted_player_is_refused_once_per_connector() {
    let (mut state, origin) = level_two_session();
    let connector = state.realm(origin).unwrap().connectors[1].id;
    state.player.stamina = 5.0;

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut transit = handle.subscribe(Topic::Transit);

    walk_to_connector(&handle, connector).await;
    assert_eq!(
        next_transit(&mut transit).await,
        TransitEvent::TravelRefused {
            realm: origin,
            connector
        }
    );

    let refused = handle.query_state().await.unwrap();
    assert_eq!(refused.discovery_log.last(), Some(EXHAUSTED_MESSAGE));
    assert_eq!(refused.player.current_realm, origin);
    assert!(refused.transit.is_idle());

    // Pushing into the same connector again stays silent.
    let outcome = handle.step().await.unwrap();
    assert_eq!(outcome, TickOutcome::ConnectorReached { connector });
    let after = handle.query_state().await.unwrap();
    assert_eq!(after.discovery_log.len(), refused.discovery_log.len());
    assert!(transit.try_recv().is_err());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

async fn wait_until_idle(handle: &RuntimeHandle) -> GameState {
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            let state = handle.query_state().await.unwrap();
            if state.transit.is_idle() {
                return state;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("pending discovery resolves in time")
}

#[tokio::test]
async fn resumed_session_finishes_its_pending_discovery() {
    let config = GameConfig::default();
    let env = GameEnv::new(&config, &PcgRng);
    let (mut state, origin) = level_two_session();
    let connector = state.realm(origin).unwrap().connectors[1].id;
    let started = GameEngine::new(&mut state)
        .reach_connector(&env, connector)
        .unwrap();
    assert!(matches!(started, ConnectorOutcome::DiscoveryStarted(_)));
    let realms_before = state.realms.len();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .details_provider(FixedDetailsProvider::new(RealmDetails::new(
            "Ash Reach",
            "Cinders drift upward.",
        )))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let state = wait_until_idle(&handle).await;
    assert_eq!(state.realms.len(), realms_before + 1);
    assert_ne!(state.player.current_realm, origin);
    assert_eq!(state.current_realm().unwrap().name, "Ash Reach");
    assert_eq!(state.player.stamina, 80.0);
    assert!(matches!(
        handle.step().await.unwrap(),
        TickOutcome::Advanced { .. }
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn resumed_session_reports_its_own_seed() {
    let (state, _) = level_two_session();
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: None,
            ..manual_config()
        })
        .initial_state(state)
        .build()
        .await
        .unwrap();

    assert_eq!(runtime.seed(), SEED);
    runtime.shutdown().await.unwrap();
}
