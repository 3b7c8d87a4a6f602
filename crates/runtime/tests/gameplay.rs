//! Player actions, combat and respawn driven through the runtime handle.

mod support;

use game_core::{
    ActionResult, AttackError, AttackOutcome, DEFEAT_MESSAGE, EntityId, ExecuteError, HealError,
    Point, TickOutcome,
};
use runtime::{Event, GameStateEvent, Runtime, RuntimeConfig, RuntimeError, Topic, TransitEvent};

use support::*;

#[tokio::test]
async fn lethal_hit_respawns_player_at_home() {
    let (mut state, origin) = level_two_session();
    let home = state.player.home_realm;
    let center = state.player.position;
    state.player.health = 3.0;
    state
        .realms
        .replace_entities(
            origin,
            vec![mob_at(Point::new(center.x + 30.0, center.y), 50.0, 5.0)],
        )
        .unwrap();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut transit = handle.subscribe(Topic::Transit);

    let outcome = handle.step().await.unwrap();
    assert_eq!(outcome, TickOutcome::Respawned { defeated_in: origin });
    assert_eq!(
        next_transit(&mut transit).await,
        TransitEvent::PlayerRespawned { defeated_in: origin }
    );

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.player.current_realm, home);
    assert_eq!(state.player.health, state.player.max_health);
    assert_eq!(state.player.stamina, 50.0);
    assert_eq!(state.discovery_log.last(), Some(DEFEAT_MESSAGE));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn heal_below_cost_is_rejected_without_side_effects() {
    let (mut state, _) = level_two_session();
    state.player.health = 40.0;
    state.player.stamina = 5.0;

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let before = handle.query_state().await.unwrap();

    for _ in 0..3 {
        let result = handle.heal().await;
        assert!(matches!(
            result,
            Err(RuntimeError::Execute(ExecuteError::Heal(ref phase)))
                if matches!(phase.error, HealError::InsufficientStamina { .. })
        ));
    }
    assert_eq!(handle.query_state().await.unwrap(), before);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn heal_restores_health_and_publishes_snapshot() {
    let (mut state, _) = level_two_session();
    state.player.health = 40.0;

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut updates = handle.subscribe(Topic::GameState);

    let result = handle.heal().await.unwrap();
    assert!(matches!(result, ActionResult::Heal(outcome) if outcome.restored == 30.0));

    let snapshot = next_committed(&mut updates).await;
    assert_eq!(snapshot.player.health, 70.0);
    assert_eq!(snapshot.player.stamina, 90.0);
    assert_eq!(snapshot.nonce, 1);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn attack_without_target_changes_nothing() {
    let (state, _) = level_two_session();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut updates = handle.subscribe(Topic::GameState);
    let before = handle.query_state().await.unwrap();

    let result = handle.attack().await;
    assert!(matches!(
        result,
        Err(RuntimeError::Execute(ExecuteError::Attack(ref phase)))
            if matches!(phase.error, AttackError::NoTargetInRange { .. })
    ));
    assert_eq!(handle.query_state().await.unwrap(), before);
    assert!(matches!(
        updates.recv().await,
        Ok(Event::GameState(GameStateEvent::ActionFailed {
            code: "ATTACK_NO_TARGET_IN_RANGE",
            ..
        }))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn killing_blow_removes_mob_and_pays_by_level() {
    let (mut state, origin) = level_two_session();
    let center = state.player.position;
    let resources = state.player.resources;
    state
        .realms
        .replace_entities(
            origin,
            vec![mob_at(Point::new(center.x + 60.0, center.y), 20.0, 5.0)],
        )
        .unwrap();

    let runtime = Runtime::builder()
        .config(manual_config())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let result = handle.attack().await.unwrap();
    assert_eq!(
        result,
        ActionResult::Attack(AttackOutcome::Killed {
            target: EntityId(900),
            bounty: 20
        })
    );

    let state = handle.query_state().await.unwrap();
    assert!(state.current_realm().unwrap().entities.is_empty());
    assert_eq!(state.player.resources, resources + 20);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn step_requires_manual_mode() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(SEED),
            ..RuntimeConfig::default()
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(matches!(handle.step().await, Err(RuntimeError::NotManual)));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn player_stays_inside_realm_bounds() {
    let runtime = Runtime::builder()
        .config(manual_config())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let state = handle.query_state().await.unwrap();
    let config = game_core::GameConfig::default();
    let low = config.entity_radius;
    let high = config.realm_size - config.entity_radius;

    // Head for the corner away from the home connector.
    let connector = state.current_realm().unwrap().connectors[0].position;
    let away = game_core::MoveInput::new(
        if connector.x > state.player.position.x { -1.0 } else { 1.0 },
        if connector.y > state.player.position.y { -1.0 } else { 1.0 },
    );
    handle.set_movement(away).await.unwrap();

    for _ in 0..200 {
        let outcome = handle.step().await.unwrap();
        assert!(matches!(outcome, TickOutcome::Advanced { .. }));
        let position = handle.query_state().await.unwrap().player.position;
        assert!((low..=high).contains(&position.x));
        assert!((low..=high).contains(&position.y));
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}
