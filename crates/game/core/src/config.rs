/// Game configuration constants and tunable parameters.
///
/// Distances are in realm-local units, rates are per tick unless the field
/// name says otherwise. Every field has a default, so a partial config file
/// only overrides what it names.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of every (square) realm.
    pub realm_size: f64,
    /// Collision radius shared by the player and entities; bounds clamping keeps
    /// the player this far from every wall.
    pub entity_radius: f64,
    /// Player displacement per tick at full input deflection.
    pub player_speed: f64,
    /// Simulation frequency.
    pub tick_rate_hz: u32,

    /// Distance at which the player triggers a connector.
    pub connector_trigger_radius: f64,
    /// Gap between the connector ring and the realm edge.
    pub connector_margin: f64,

    pub stamina_regen_per_tick: f64,
    pub travel_cost: f64,
    pub heal_cost: f64,
    pub heal_amount: f64,
    pub death_penalty: f64,

    /// Aggressive entities closer than this chase the player.
    pub aggro_radius: f64,
    /// Entity displacement per tick while chasing.
    pub mob_step: f64,
    /// Chasing entities stop closing in once inside this radius.
    pub melee_hold_radius: f64,
    /// Aggressive entities inside this radius hit the player.
    pub mob_attack_radius: f64,
    /// Minimum time between two hits of the same entity (exclusive).
    pub mob_attack_cooldown_ms: u64,
    /// Damage dealt by entities that carry no explicit damage value.
    pub default_mob_damage: f64,

    pub player_attack_range: f64,
    pub player_attack_damage: f64,
    /// Resources granted per realm level for a kill.
    pub bounty_per_level: u64,

    /// Spawned entities keep at least this distance from every wall.
    pub spawn_margin: f64,
    pub min_mobs_per_realm: u32,
    pub max_mobs_per_realm: u32,
    pub mob_health_per_level: f64,
    pub mob_damage_per_level: f64,

    pub player_max_health: f64,
    pub player_max_stamina: f64,
    pub player_starting_resources: u64,
}

impl GameConfig {
    pub const DEFAULT_REALM_SIZE: f64 = 1000.0;
    pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

    pub fn new() -> Self {
        Self {
            realm_size: Self::DEFAULT_REALM_SIZE,
            entity_radius: 20.0,
            player_speed: 5.0,
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,

            connector_trigger_radius: 50.0,
            connector_margin: 50.0,

            stamina_regen_per_tick: 0.1,
            travel_cost: 20.0,
            heal_cost: 10.0,
            heal_amount: 30.0,
            death_penalty: 50.0,

            aggro_radius: 200.0,
            mob_step: 2.0,
            melee_hold_radius: 30.0,
            mob_attack_radius: 40.0,
            mob_attack_cooldown_ms: 1000,
            default_mob_damage: 5.0,

            player_attack_range: 100.0,
            player_attack_damage: 25.0,
            bounty_per_level: 10,

            spawn_margin: 100.0,
            min_mobs_per_realm: 3,
            max_mobs_per_realm: 7,
            mob_health_per_level: 50.0,
            mob_damage_per_level: 5.0,

            player_max_health: 100.0,
            player_max_stamina: 100.0,
            player_starting_resources: 100,
        }
    }

    /// Length of one tick in milliseconds.
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.tick_rate_hz.max(1))
    }

    /// Realm center; every arrival and respawn lands here.
    pub fn spawn_point(&self) -> crate::geometry::Point {
        let half = self.realm_size / 2.0;
        crate::geometry::Point::new(half, half)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
