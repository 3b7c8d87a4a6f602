//! Discovery of a new realm through an unregistered connector.
//!
//! Discovery is split in two so the flavor text can be fetched asynchronously
//! between the halves:
//!
//! 1. [`BeginDiscoveryAction`] fixes level and biome, reserves the travel
//!    stamina and marks the transit state as awaiting generation.
//! 2. [`CommitDiscoveryAction`] builds the realm from the pending request plus
//!    the fetched [`RealmDetails`], registers the connector and moves the
//!    player. [`AbortDiscoveryAction`] releases the request and refunds the
//!    reserved stamina instead.

use strum::{EnumCount, IntoEnumIterator};

use crate::engine::StateReducer;
use crate::env::{GameEnv, compute_seed};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BiomeKind, ConnectorId, GameState, PendingDiscovery, RealmDetails, RealmId};
use crate::worldgen::{RealmBlueprint, generate_realm};

use super::{ActionTransition, SCANNING_MESSAGE};

const CONTEXT_BIOME: u32 = 100;
const CONTEXT_REALM: u32 = 101;

pub const FADED_MESSAGE: &str = "The path ahead fades into the mist.";

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("a discovery through {0} is already in flight")]
    AlreadyPending(ConnectorId),

    #[error("no discovery is in flight")]
    NotPending,

    #[error("realm {0} is missing from the store")]
    RealmMissing(RealmId),

    #[error("connector {0} does not exist in the origin realm")]
    ConnectorNotFound(ConnectorId),

    #[error("connector {connector} is already linked to {target}")]
    AlreadyRegistered {
        connector: ConnectorId,
        target: RealmId,
    },

    #[error("discovery needs {required} stamina, only {available:.1} available")]
    Exhausted { required: f64, available: f64 },

    #[error("player left origin realm {origin} before the discovery resolved")]
    PlayerAway { origin: RealmId },

    #[error("realm {realm} failed structural checks: {reason}")]
    Malformed { realm: RealmId, reason: &'static str },
}

impl GameError for DiscoveryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DiscoveryError::Exhausted { .. } | DiscoveryError::AlreadyPending(_) => {
                ErrorSeverity::Recoverable
            }
            DiscoveryError::NotPending
            | DiscoveryError::ConnectorNotFound(_)
            | DiscoveryError::AlreadyRegistered { .. }
            | DiscoveryError::PlayerAway { .. } => ErrorSeverity::Validation,
            DiscoveryError::RealmMissing(_) | DiscoveryError::Malformed { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DiscoveryError::AlreadyPending(_) => "DISCOVERY_ALREADY_PENDING",
            DiscoveryError::NotPending => "DISCOVERY_NOT_PENDING",
            DiscoveryError::RealmMissing(_) => "DISCOVERY_REALM_MISSING",
            DiscoveryError::ConnectorNotFound(_) => "DISCOVERY_CONNECTOR_NOT_FOUND",
            DiscoveryError::AlreadyRegistered { .. } => "DISCOVERY_ALREADY_REGISTERED",
            DiscoveryError::Exhausted { .. } => "DISCOVERY_EXHAUSTED",
            DiscoveryError::PlayerAway { .. } => "DISCOVERY_PLAYER_AWAY",
            DiscoveryError::Malformed { .. } => "DISCOVERY_MALFORMED",
        }
    }
}

/// Checks that `connector` exists in `origin` and has no target yet.
fn ensure_unregistered(
    state: &GameState,
    origin: RealmId,
    connector: ConnectorId,
) -> Result<u32, DiscoveryError> {
    let realm = state
        .realm(origin)
        .ok_or(DiscoveryError::RealmMissing(origin))?;
    let found = realm
        .connector(connector)
        .ok_or(DiscoveryError::ConnectorNotFound(connector))?;
    if let Some(target) = found.target() {
        return Err(DiscoveryError::AlreadyRegistered { connector, target });
    }
    Ok(realm.level)
}

fn pending(state: &GameState) -> Result<PendingDiscovery, DiscoveryError> {
    state
        .transit
        .pending()
        .copied()
        .ok_or(DiscoveryError::NotPending)
}

// ---------------------------------------------------------------------------
// Begin
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginDiscoveryAction {
    pub connector: ConnectorId,
}

impl BeginDiscoveryAction {
    pub fn new(connector: ConnectorId) -> Self {
        Self { connector }
    }
}

impl ActionTransition for BeginDiscoveryAction {
    type Error = DiscoveryError;
    type Result = PendingDiscovery;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if let Some(pending) = state.transit.pending() {
            return Err(DiscoveryError::AlreadyPending(pending.connector));
        }
        ensure_unregistered(state, state.player.current_realm, self.connector)?;

        let cost = env.config().travel_cost;
        if !state.player.can_afford(cost) {
            return Err(DiscoveryError::Exhausted {
                required: cost,
                available: state.player.stamina,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let origin = state.player.current_realm;
        let origin_level = ensure_unregistered(state, origin, self.connector)?;

        let seed = compute_seed(state.game_seed, state.nonce, self.connector.0, CONTEXT_BIOME);
        let biome = BiomeKind::iter()
            .nth(env.rng().index(seed, BiomeKind::COUNT))
            .unwrap_or(BiomeKind::Forest);

        let pending = PendingDiscovery {
            origin,
            connector: self.connector,
            level: origin_level + 1,
            biome,
        };

        let stamina = state.player.stamina - env.config().travel_cost;

        let mut reducer = StateReducer::new(state);
        reducer.transit().begin(pending);
        reducer.player().set_stamina(stamina);
        reducer.log().push(SCANNING_MESSAGE);

        Ok(pending)
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitDiscoveryAction {
    pub details: RealmDetails,
}

impl CommitDiscoveryAction {
    pub fn new(details: RealmDetails) -> Self {
        Self { details }
    }
}

/// Summary of a committed discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveredRealm {
    pub realm: RealmId,
    pub origin: RealmId,
    pub connector: ConnectorId,
    pub level: u32,
    pub biome: BiomeKind,
}

impl ActionTransition for CommitDiscoveryAction {
    type Error = DiscoveryError;
    type Result = DiscoveredRealm;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let pending = pending(state)?;
        ensure_unregistered(state, pending.origin, pending.connector)?;
        // The tick is suspended in the origin realm, so only a hand-built
        // state can get here with the player elsewhere.
        if state.player.current_realm != pending.origin {
            return Err(DiscoveryError::PlayerAway {
                origin: pending.origin,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let config = env.config();
        let pending = pending(state)?;

        let id = state.ids_mut().realm();
        let seed = compute_seed(state.game_seed, state.nonce, id.0, CONTEXT_REALM);
        let realm = generate_realm(
            env,
            state.ids_mut(),
            seed,
            RealmBlueprint {
                id,
                level: pending.level,
                biome: pending.biome,
                details: self.details.clone(),
                origin: pending.origin,
            },
        );
        let name = realm.name.clone();

        let mut reducer = StateReducer::new(state);
        let linked = reducer
            .realms()
            .link_connector(pending.origin, pending.connector, id)
            .map_err(|_| DiscoveryError::RealmMissing(pending.origin))?;
        if !linked {
            return Err(
                ensure_unregistered(reducer.state(), pending.origin, pending.connector)
                    .err()
                    .unwrap_or(DiscoveryError::ConnectorNotFound(pending.connector)),
            );
        }
        reducer
            .realms()
            .insert(realm)
            .map_err(|_| DiscoveryError::Malformed {
                realm: id,
                reason: "realm id already in use",
            })?;
        reducer.transit().finish();

        // Travel stamina was reserved when the discovery began.
        reducer.player().relocate(id, config.spawn_point());
        reducer
            .log()
            .push(format!("Successfully ventured into {name}"));

        Ok(DiscoveredRealm {
            realm: id,
            origin: pending.origin,
            connector: pending.connector,
            level: pending.level,
            biome: pending.biome,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        // The newest realm always has the highest id.
        let Some(realm) = state.realms.iter().last() else {
            return Err(DiscoveryError::RealmMissing(state.player.current_realm));
        };
        let malformed = |reason| DiscoveryError::Malformed {
            realm: realm.id,
            reason,
        };

        if realm.connectors.len() != realm.level as usize {
            return Err(malformed("connector count differs from level"));
        }
        let Some(origin) = realm.connectors.first().and_then(|c| c.target()) else {
            return Err(malformed("missing back link"));
        };
        let linked_forward = state
            .realm(origin)
            .is_some_and(|o| o.connectors.iter().any(|c| c.target() == Some(realm.id)));
        if !linked_forward {
            return Err(malformed("origin connector not registered"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Abort
// ---------------------------------------------------------------------------

/// Releases a pending discovery without creating a realm and gives back the
/// stamina reserved for the trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbortDiscoveryAction;

impl ActionTransition for AbortDiscoveryAction {
    type Error = DiscoveryError;
    type Result = PendingDiscovery;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        pending(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let pending = pending(state)?;
        let refunded = state.player.stamina + env.config().travel_cost;

        let mut reducer = StateReducer::new(state);
        reducer.transit().finish();
        reducer.player().set_stamina(refunded);
        reducer.log().push(FADED_MESSAGE);
        Ok(pending)
    }
}
