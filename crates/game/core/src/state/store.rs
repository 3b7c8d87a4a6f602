//! Realm graph store.
//!
//! The store maps realm ids to realms and only ever grows. Realms are shared
//! behind [`Arc`], and the map itself is shared too, so cloning a store (and
//! therefore a whole [`GameState`](super::GameState)) is cheap. Mutations go
//! through [`Arc::make_mut`]: a store that shares its map with a published
//! snapshot copies the map of pointers, then copies only the realm being
//! patched. Readers holding the old snapshot never observe a partially
//! mutated realm.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ErrorSeverity, GameError};

use super::{Connector, GameEntity, Realm, RealmId};

/// Errors raised by realm store mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("realm {0} is already registered")]
    DuplicateRealm(RealmId),

    #[error("realm {0} not found")]
    RealmNotFound(RealmId),
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::DuplicateRealm(_) => "STORE_DUPLICATE_REALM",
            StoreError::RealmNotFound(_) => "STORE_REALM_NOT_FOUND",
        }
    }
}

/// Copy-on-write mapping from realm id to realm.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmStore {
    realms: Arc<HashMap<RealmId, Arc<Realm>>>,
}

impl RealmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RealmId) -> Option<&Realm> {
        self.realms.get(&id).map(Arc::as_ref)
    }

    /// Returns the shared handle for `id`, for readers that outlive the store.
    pub fn get_shared(&self, id: RealmId) -> Option<Arc<Realm>> {
        self.realms.get(&id).cloned()
    }

    pub fn contains(&self, id: RealmId) -> bool {
        self.realms.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.realms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }

    /// Iterates realms in ascending id order, i.e. discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Realm> {
        let mut realms: Vec<&Realm> = self.realms.values().map(Arc::as_ref).collect();
        realms.sort_by_key(|realm| realm.id);
        realms.into_iter()
    }

    /// Adds a new realm. Existing realms are never replaced.
    pub fn insert(&mut self, realm: Realm) -> Result<(), StoreError> {
        if self.realms.contains_key(&realm.id) {
            return Err(StoreError::DuplicateRealm(realm.id));
        }
        Arc::make_mut(&mut self.realms).insert(realm.id, Arc::new(realm));
        Ok(())
    }

    /// Applies `patch` to a single realm, leaving every other entry shared.
    pub fn patch<R>(
        &mut self,
        id: RealmId,
        patch: impl FnOnce(&mut Realm) -> R,
    ) -> Result<R, StoreError> {
        if !self.realms.contains_key(&id) {
            return Err(StoreError::RealmNotFound(id));
        }
        let realms = Arc::make_mut(&mut self.realms);
        let realm = realms.get_mut(&id).ok_or(StoreError::RealmNotFound(id))?;
        Ok(patch(Arc::make_mut(realm)))
    }

    /// Replaces the entity list of one realm.
    pub fn replace_entities(
        &mut self,
        id: RealmId,
        entities: Vec<GameEntity>,
    ) -> Result<(), StoreError> {
        self.patch(id, |realm| realm.entities = entities)
    }

    /// Replaces the connector list of one realm.
    pub fn replace_connectors(
        &mut self,
        id: RealmId,
        connectors: Vec<Connector>,
    ) -> Result<(), StoreError> {
        self.patch(id, |realm| realm.connectors = connectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::state::{BiomeKind, ConnectorId, ConnectorKind, RealmStats};

    fn realm(id: u32) -> Realm {
        Realm {
            id: RealmId(id),
            name: format!("Realm {id}"),
            description: String::new(),
            level: 1,
            stats: RealmStats::for_level(1),
            connectors: vec![Connector::new(
                ConnectorId(id),
                ConnectorKind::Road,
                Point::new(950.0, 500.0),
            )],
            entities: Vec::new(),
            owner: None,
            is_home: false,
            biome: BiomeKind::Forest,
        }
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut store = RealmStore::new();
        store.insert(realm(1)).unwrap();
        assert_eq!(
            store.insert(realm(1)),
            Err(StoreError::DuplicateRealm(RealmId(1)))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn patch_leaves_snapshot_untouched() {
        let mut store = RealmStore::new();
        store.insert(realm(1)).unwrap();
        store.insert(realm(2)).unwrap();

        let snapshot = store.clone();
        let untouched_before = snapshot.get_shared(RealmId(2)).unwrap();

        store
            .patch(RealmId(1), |realm| realm.name = "Patched".into())
            .unwrap();

        assert_eq!(snapshot.get(RealmId(1)).unwrap().name, "Realm 1");
        assert_eq!(store.get(RealmId(1)).unwrap().name, "Patched");
        // The unaffected realm is still the very same allocation.
        assert!(Arc::ptr_eq(
            &untouched_before,
            &store.get_shared(RealmId(2)).unwrap()
        ));
    }

    #[test]
    fn patch_missing_realm_fails() {
        let mut store = RealmStore::new();
        let result = store.patch(RealmId(7), |_| ());
        assert_eq!(result, Err(StoreError::RealmNotFound(RealmId(7))));
    }

    #[test]
    fn iter_is_ordered_by_id() {
        let mut store = RealmStore::new();
        store.insert(realm(3)).unwrap();
        store.insert(realm(1)).unwrap();
        store.insert(realm(2)).unwrap();
        let ids: Vec<RealmId> = store.iter().map(|realm| realm.id).collect();
        assert_eq!(ids, vec![RealmId(1), RealmId(2), RealmId(3)]);
    }
}
