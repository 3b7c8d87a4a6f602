use super::{EntityId, RealmId};
use crate::config::GameConfig;
use crate::geometry::Point;

/// The single player character of a session.
///
/// # Invariants
///
/// - `0 <= health <= max_health`
/// - `0 <= stamina <= max_stamina`
/// - `current_realm` resolves in the realm store
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: EntityId,
    pub name: String,
    pub health: f64,
    pub max_health: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub level: u32,
    pub experience: u64,
    pub position: Point,
    pub current_realm: RealmId,
    /// Item identifiers, in pickup order.
    pub inventory: Vec<String>,
    /// Currency.
    pub resources: u64,
    /// Respawn anchor, fixed at creation.
    pub home_realm: RealmId,
}

impl PlayerState {
    /// Creates a fresh player standing at the center of its home realm.
    pub fn new(name: impl Into<String>, home_realm: RealmId, config: &GameConfig) -> Self {
        Self {
            id: EntityId::PLAYER,
            name: name.into(),
            health: config.player_max_health,
            max_health: config.player_max_health,
            stamina: config.player_max_stamina,
            max_stamina: config.player_max_stamina,
            level: 1,
            experience: 0,
            position: config.spawn_point(),
            current_realm: home_realm,
            inventory: Vec::new(),
            resources: config.player_starting_resources,
            home_realm,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn can_afford(&self, stamina_cost: f64) -> bool {
        self.stamina >= stamina_cost
    }

    /// Sets health, clamped into `[0, max_health]`.
    pub fn set_health(&mut self, health: f64) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Sets stamina, clamped into `[0, max_stamina]`.
    pub fn set_stamina(&mut self, stamina: f64) {
        self.stamina = stamina.clamp(0.0, self.max_stamina);
    }

    /// Places the player at `position` inside `realm`.
    pub fn relocate(&mut self, realm: RealmId, position: Point) {
        self.current_realm = realm;
        self.position = position;
    }
}
