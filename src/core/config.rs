//! Simulation tuning, loaded from `assets/data/simulation.ron`.
//!
//! All durations are in ticks and all speeds are per tick. The defaults
//! assume roughly 60 ticks per second.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::squad::FormationKind;

/// Default location of the simulation config file.
pub const SIM_CONFIG_PATH: &str = "assets/data/simulation.ron";

/// Every tunable of the simulation.
#[derive(Resource, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for [`crate::core::SimRng`]
    pub seed: u64,
    pub world: WorldConfig,
    pub units: UnitConfig,
    pub squad: SquadConfig,
    pub carry: CarryConfig,
    pub combat: CombatConfig,
    pub onion: OnionConfig,
    pub treasure: TreasureConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Height of the ground plane
    pub ground_height: f32,
    /// Downward acceleration applied to airborne units, per tick
    pub gravity: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_height: 0.0,
            gravity: 0.006,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UnitConfig {
    pub max_health: f32,
    /// Base ground speed before the kind's speed multiplier
    pub move_speed: f32,
    /// Units stop walking once this close to their formation spot
    pub stop_distance: f32,
    /// Ticks between touching down and becoming controllable
    pub settle_ticks: u32,
    /// Fraction of horizontal velocity shed per tick while settling
    pub landing_deceleration: f32,
    /// Ticks a unit spends rising out of the ground after spawning
    pub emerge_ticks: u32,
    /// Ticks a unit stays frozen by a cold hazard
    pub freeze_ticks: u32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            move_speed: 0.08,
            stop_distance: 0.3,
            settle_ticks: 30,
            landing_deceleration: 0.08,
            emerge_ticks: 40,
            freeze_ticks: 180,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SquadConfig {
    pub max_units: usize,
    pub formation: FormationKind,
    pub formation_spacing: f32,
    pub units_per_ring: usize,
    pub units_per_row: usize,
    pub whistle_radius: f32,
    /// Ticks a whistled unit ignores loads and hostiles
    pub recall_ticks: u32,
    /// Register with the squad automatically when a unit finishes settling
    pub auto_register: bool,
    pub leader_health: f32,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            max_units: 100,
            formation: FormationKind::Ring,
            formation_spacing: 1.0,
            units_per_ring: 8,
            units_per_row: 5,
            whistle_radius: 20.0,
            recall_ticks: 60,
            auto_register: true,
            leader_health: 100.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CarryConfig {
    /// How far a free unit looks for something to carry
    pub detection_radius: f32,
    /// Distance the load travels per tick once anchored
    pub carry_speed: f32,
    /// Minimum height of a load while it is carried
    pub carry_height: f32,
    /// Horizontal distance to the destination that counts as arrival
    pub arrival_distance: f32,
    /// Radius of the ring carriers form around the load
    pub carrier_radius: f32,
    /// Fraction of the gap to its slot a carrier closes each tick
    pub follow_rate: f32,
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            detection_radius: 2.0,
            carry_speed: 0.05,
            carry_height: 1.0,
            arrival_distance: 1.0,
            carrier_radius: 1.0,
            follow_rate: 0.25,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CombatConfig {
    pub detection_radius: f32,
    pub melee_range: f32,
    pub attack_damage: f32,
    pub attack_interval: u32,
    pub latch_chance: f32,
    pub latch_ticks: u32,
    pub latch_offset: f32,
    pub latch_height: f32,
    /// Probability of hanging on through one shake
    pub shake_off_resistance: f32,
    /// Speed a unit is flung with when shaken off
    pub fling_speed: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            detection_radius: 5.0,
            melee_range: 1.5,
            attack_damage: 5.0,
            attack_interval: 60,
            latch_chance: 0.8,
            latch_ticks: 300,
            latch_offset: 0.5,
            latch_height: 1.0,
            shake_off_resistance: 0.7,
            fling_speed: 0.15,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OnionConfig {
    /// Leader distance that wakes a buried onion
    pub activation_radius: f32,
    pub buried_depth: f32,
    pub rise_ticks: u32,
    /// Ticks a delivered load takes to be drawn in
    pub absorb_ticks: u32,
    pub spawn_cooldown: u32,
    pub max_active_spawns: usize,
    pub spawn_radius: f32,
    pub dig_depth: f32,
}

impl Default for OnionConfig {
    fn default() -> Self {
        Self {
            activation_radius: 3.0,
            buried_depth: 3.0,
            rise_ticks: 90,
            absorb_ticks: 24,
            spawn_cooldown: 120,
            max_active_spawns: 5,
            spawn_radius: 3.0,
            dig_depth: 2.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TreasureConfig {
    /// How close a treasure-finding unit has to be to reveal a buried load
    pub reveal_radius: f32,
    /// How far under the surface buried loads start
    pub buried_depth: f32,
    /// Work needed to dig a load out
    pub dig_work: f32,
    /// Work one digger of strength 1.0 does per tick
    pub dig_rate: f32,
    /// Ticks a dug-out load takes to reach the surface
    pub rise_ticks: u32,
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            reveal_radius: 5.0,
            buried_depth: 2.0,
            dig_work: 100.0,
            dig_rate: 1.0,
            rise_ticks: 120,
        }
    }
}

impl SimConfig {
    /// Parse a config from RON text. Missing fields keep their defaults.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str::<SimConfig>(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::from_ron(&display, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SimConfig::from_ron(
            "inline",
            "(seed: 42, carry: (carry_speed: 0.5), squad: (formation: Grid))",
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.carry.carry_speed, 0.5);
        assert_eq!(config.carry.arrival_distance, 1.0);
        assert_eq!(config.squad.formation, FormationKind::Grid);
        assert_eq!(config.squad.max_units, 100);
        assert_eq!(config.treasure.dig_work, 100.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = SimConfig::from_ron("broken.ron", "(seed: ").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = SimConfig::load(Path::new("assets/data/does_not_exist.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }
}
