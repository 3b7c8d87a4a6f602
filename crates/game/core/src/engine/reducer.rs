use crate::geometry::Point;
use crate::state::{
    ConnectorId, DiscoveryLog, GameEntity, GameState, PendingDiscovery, PlayerState, Realm,
    RealmId, RealmStore, StoreError, TransitStatus,
};

/// Wraps mutable access to [`GameState`] with structured sub-reducers.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn player(&mut self) -> PlayerReducer<'_> {
        PlayerReducer {
            player: &mut self.state.player,
        }
    }

    pub fn realms(&mut self) -> RealmsReducer<'_> {
        RealmsReducer {
            realms: &mut self.state.realms,
        }
    }

    pub fn log(&mut self) -> LogReducer<'_> {
        LogReducer {
            log: &mut self.state.discovery_log,
        }
    }

    pub fn transit(&mut self) -> TransitReducer<'_> {
        TransitReducer {
            transit: &mut self.state.transit,
        }
    }
}

pub struct PlayerReducer<'a> {
    player: &'a mut PlayerState,
}

impl<'a> PlayerReducer<'a> {
    pub fn set_position(&mut self, position: Point) -> Point {
        std::mem::replace(&mut self.player.position, position)
    }

    pub fn set_health(&mut self, health: f64) {
        self.player.set_health(health);
    }

    pub fn set_stamina(&mut self, stamina: f64) {
        self.player.set_stamina(stamina);
    }

    pub fn relocate(&mut self, realm: RealmId, position: Point) {
        self.player.relocate(realm, position);
    }

    pub fn add_resources(&mut self, amount: u64) {
        self.player.resources = self.player.resources.saturating_add(amount);
    }
}

pub struct RealmsReducer<'a> {
    realms: &'a mut RealmStore,
}

impl<'a> RealmsReducer<'a> {
    pub fn insert(&mut self, realm: Realm) -> Result<(), StoreError> {
        self.realms.insert(realm)
    }

    pub fn replace_entities(
        &mut self,
        realm: RealmId,
        entities: Vec<GameEntity>,
    ) -> Result<(), StoreError> {
        self.realms.replace_entities(realm, entities)
    }

    /// Registers `connector` in `realm` towards `target`. Returns false when
    /// the connector is missing or already registered.
    pub fn link_connector(
        &mut self,
        realm: RealmId,
        connector: ConnectorId,
        target: RealmId,
    ) -> Result<bool, StoreError> {
        self.realms.patch(realm, |realm| {
            realm
                .connector_mut(connector)
                .is_some_and(|connector| connector.link(target))
        })
    }
}

pub struct LogReducer<'a> {
    log: &'a mut DiscoveryLog,
}

impl<'a> LogReducer<'a> {
    pub fn push(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }
}

pub struct TransitReducer<'a> {
    transit: &'a mut TransitStatus,
}

impl<'a> TransitReducer<'a> {
    pub fn begin(&mut self, pending: PendingDiscovery) {
        debug_assert!(self.transit.is_idle());
        *self.transit = TransitStatus::AwaitingGeneration(pending);
    }

    /// Returns the request that was pending, if any.
    pub fn finish(&mut self) -> Option<PendingDiscovery> {
        std::mem::take(self.transit).pending().copied()
    }
}
