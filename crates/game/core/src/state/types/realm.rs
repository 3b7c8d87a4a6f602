use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

use super::{ConnectorId, EntityId, GameEntity, RealmId};
use crate::geometry::Point;

/// Cosmetic category of a realm. Drives palette and flavor-text word lists.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BiomeKind {
    Forest,
    Desert,
    Volcanic,
    Mystic,
    Ruins,
}

impl BiomeKind {
    /// Returns `(foreground, background)` hex colors.
    pub const fn palette(self) -> (&'static str, &'static str) {
        match self {
            BiomeKind::Forest => ("#14532d", "#064e3b"),
            BiomeKind::Desert => ("#78350f", "#451a03"),
            BiomeKind::Volcanic => ("#7f1d1d", "#450a0a"),
            BiomeKind::Mystic => ("#4c1d95", "#2e1065"),
            BiomeKind::Ruins => ("#3f3f46", "#18181b"),
        }
    }
}

/// Visual style of a connector. Has no behavioral effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorKind {
    Road,
    Bridge,
    Sign,
    Dungeon,
}

/// Portal anchor embedded in a realm.
///
/// A connector is registered exactly when it knows its target realm; the
/// target is the single source of truth, so the two can never disagree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector {
    pub id: ConnectorId,
    pub kind: ConnectorKind,
    pub position: Point,
    target: Option<RealmId>,
}

impl Connector {
    /// Creates an unexplored connector.
    pub fn new(id: ConnectorId, kind: ConnectorKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            target: None,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<RealmId> {
        self.target
    }

    /// Registers the connector. Returns `false` if it was already linked, in
    /// which case the existing link is kept.
    pub fn link(&mut self, target: RealmId) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        true
    }
}

/// Multipliers derived from realm level at generation time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmStats {
    pub attack_speed_bonus: f64,
    /// Player health regenerated per second while inside the realm.
    pub health_regen_bonus: f64,
    pub magic_find_bonus: f64,
    pub resource_multiplier: f64,
}

impl RealmStats {
    pub fn for_level(level: u32) -> Self {
        let level = f64::from(level);
        Self {
            attack_speed_bonus: 0.1 * level,
            health_regen_bonus: 0.05 * level,
            magic_find_bonus: 0.05 * level,
            resource_multiplier: level,
        }
    }
}

/// Flavor text for a realm, produced by the text collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmDetails {
    pub name: String,
    pub description: String,
}

impl RealmDetails {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A bounded square arena in the realm graph.
///
/// # Invariants
///
/// - `connectors.len() == level`
/// - Exactly one realm of a session has `is_home == true`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Realm {
    pub id: RealmId,
    pub name: String,
    pub description: String,
    pub level: u32,
    pub stats: RealmStats,
    pub connectors: Vec<Connector>,
    pub entities: Vec<GameEntity>,
    pub owner: Option<EntityId>,
    pub is_home: bool,
    pub biome: BiomeKind,
}

impl Realm {
    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|connector| connector.id == id)
    }

    pub fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        self.connectors.iter_mut().find(|connector| connector.id == id)
    }

    /// First connector (in list order) whose trigger circle contains `position`.
    pub fn touching_connector(&self, position: Point, radius: f64) -> Option<&Connector> {
        self.connectors
            .iter()
            .find(|connector| connector.position.distance(position) < radius)
    }
}
