use std::fmt;

/// Unique identifier for a realm in the realm graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmId(pub u32);

impl fmt::Display for RealmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "realm-{}", self.0)
    }
}

/// Unique identifier for a connector. Unique across the whole graph, not just
/// within its realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectorId(pub u32);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Unique identifier for the player or a realm entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical simulation time in milliseconds.
///
/// Supplied by the caller of the tick; the core never reads a wall clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub const fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Monotonic id allocator for realms, connectors and entities.
///
/// Ids are never reused, even though nothing is ever deleted from the realm
/// graph; entities killed in combat keep their id retired.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdAllocator {
    next_realm: u32,
    next_connector: u32,
    next_entity: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_realm: 0,
            next_connector: 0,
            // 0 is reserved for the player
            next_entity: 1,
        }
    }

    pub fn realm(&mut self) -> RealmId {
        let id = RealmId(self.next_realm);
        self.next_realm = self.next_realm.wrapping_add(1);
        id
    }

    pub fn connector(&mut self) -> ConnectorId {
        let id = ConnectorId(self.next_connector);
        self.next_connector = self.next_connector.wrapping_add(1);
        id
    }

    pub fn entity(&mut self) -> EntityId {
        if self.next_entity == EntityId::PLAYER.0 {
            self.next_entity = 1;
        }
        let id = EntityId(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_hands_out_player_id() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.entity(), EntityId(1));
        assert_eq!(ids.entity(), EntityId(2));
        assert_eq!(ids.realm(), RealmId(0));
        assert_eq!(ids.realm(), RealmId(1));
        assert_eq!(ids.connector(), ConnectorId(0));
    }

    #[test]
    fn millis_since_saturates() {
        assert_eq!(Timestamp(1500).millis_since(Timestamp(500)), 1000);
        assert_eq!(Timestamp(500).millis_since(Timestamp(1500)), 0);
    }
}
