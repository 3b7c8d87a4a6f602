//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use game_core::worldgen::{RealmBlueprint, generate_realm};
use game_core::{
    BiomeKind, ConnectorId, EntityId, EntityKind, GameConfig, GameEntity, GameEnv, GameState,
    MoveInput, PcgRng, Point, RealmDetails, RealmId, TickOutcome,
};
use runtime::{
    Event, GameStateEvent, RetryPolicy, RuntimeConfig, RuntimeHandle, TickMode, TransitEvent,
};

pub const SEED: u64 = 42;

pub fn manual_config() -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(SEED),
        tick_mode: TickMode::Manual,
        retry: RetryPolicy::immediate(2),
        ..RuntimeConfig::default()
    }
}

/// A session whose player stands at the center of a freshly generated,
/// empty level-2 realm. Connector 0 leads back home; connector 1 is unexplored.
pub fn level_two_session() -> (GameState, RealmId) {
    let config = GameConfig::default();
    let env = GameEnv::new(&config, &PcgRng);
    let mut state = GameState::new_session(SEED, "Tester", &env);
    let home = state.player.home_realm;

    let id = state.ids_mut().realm();
    let mut realm = generate_realm(
        &env,
        state.ids_mut(),
        SEED,
        RealmBlueprint {
            id,
            level: 2,
            biome: BiomeKind::Desert,
            details: RealmDetails::new("Dune Sea", "Sand without end."),
            origin: home,
        },
    );
    realm.entities.clear();
    state.realms.insert(realm).unwrap();

    let home_connector = state.home_realm().unwrap().connectors[0].id;
    state
        .realms
        .patch(home, |realm| {
            realm
                .connector_mut(home_connector)
                .map(|connector| connector.link(id))
        })
        .unwrap();
    state.player.relocate(id, config.spawn_point());
    (state, id)
}

pub fn mob_at(position: Point, health: f64, damage: f64) -> GameEntity {
    GameEntity {
        id: EntityId(900),
        kind: EntityKind::Mob,
        position,
        health,
        max_health: health,
        damage: Some(damage),
        name: "Corrupted Nomad".into(),
        color: "#ef4444".into(),
        is_aggressive: true,
        loot_table: vec!["Scrap".into()],
        last_attack: None,
    }
}

pub fn registered_connectors(state: &GameState) -> usize {
    state
        .realms
        .iter()
        .flat_map(|realm| realm.connectors.iter())
        .filter(|connector| connector.is_registered())
        .count()
}

/// Steers towards `connector` one manual tick at a time until it is touched.
pub async fn walk_to_connector(handle: &RuntimeHandle, connector: ConnectorId) -> TickOutcome {
    for _ in 0..500 {
        let state = handle.query_state().await.unwrap();
        let target = state
            .current_realm()
            .and_then(|realm| realm.connector(connector))
            .map(|found| found.position)
            .expect("connector exists in the current realm");
        handle
            .set_movement(MoveInput::towards(state.player.position, target))
            .await
            .unwrap();

        let outcome = handle.step().await.unwrap();
        if matches!(outcome, TickOutcome::ConnectorReached { .. }) {
            return outcome;
        }
    }
    panic!("connector {connector} was never reached");
}

pub async fn next_transit(rx: &mut broadcast::Receiver<Event>) -> TransitEvent {
    loop {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("transit event arrives in time")
            .expect("event bus open");
        if let Event::Transit(event) = event {
            return event;
        }
    }
}

pub async fn next_committed(rx: &mut broadcast::Receiver<Event>) -> std::sync::Arc<GameState> {
    loop {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("state event arrives in time")
            .expect("event bus open");
        if let Event::GameState(GameStateEvent::Committed { state, .. }) = event {
            return state;
        }
    }
}
