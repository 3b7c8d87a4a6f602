use super::{EntityId, Timestamp};
use crate::geometry::Point;

/// Role of an entity. Only `Mob` is spawned by the world generator today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player,
    Mob,
    Boss,
    Npc,
    Loot,
}

/// Hostile or passive actor owned by a realm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Point,
    pub health: f64,
    pub max_health: f64,
    pub damage: Option<f64>,
    pub name: String,
    pub color: String,
    /// Gates seek and attack behavior.
    pub is_aggressive: bool,
    /// Display-only loot names.
    pub loot_table: Vec<String>,
    /// When this entity last hit the player; drives the attack cooldown.
    pub last_attack: Option<Timestamp>,
}

impl GameEntity {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether the attack cooldown has elapsed at `now`.
    ///
    /// Entities that never attacked are always ready.
    pub fn attack_ready(&self, now: Timestamp, cooldown_ms: u64) -> bool {
        self.last_attack
            .is_none_or(|last| now.millis_since(last) > cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mob() -> GameEntity {
        GameEntity {
            id: EntityId(1),
            kind: EntityKind::Mob,
            position: Point::ORIGIN,
            health: 50.0,
            max_health: 50.0,
            damage: Some(5.0),
            name: "Corrupted Nomad".into(),
            color: "#ef4444".into(),
            is_aggressive: true,
            loot_table: Vec::new(),
            last_attack: None,
        }
    }

    #[test]
    fn cooldown_is_exclusive() {
        let mut entity = mob();
        assert!(entity.attack_ready(Timestamp(0), 1000));

        entity.last_attack = Some(Timestamp(1000));
        assert!(!entity.attack_ready(Timestamp(2000), 1000));
        assert!(entity.attack_ready(Timestamp(2001), 1000));
    }
}
