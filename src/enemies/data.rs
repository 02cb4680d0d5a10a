//! Hostile data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::DataLoadError;

/// Directory holding one `.ron` file per hostile type.
pub const HOSTILES_DIR: &str = "assets/data/hostiles";

#[derive(Deserialize, Clone, Debug)]
pub struct ShakeOffDefinition {
    pub interval_ticks: u32,
    pub max_latched: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EaterDefinition {
    pub range: f32,
    pub eat_ticks: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CorpseDefinition {
    pub weight: f32,
    pub value: u32,
}

fn default_patrol_wait() -> u32 {
    120
}

/// Wandering territory and biting the leader.
#[derive(Deserialize, Clone, Debug)]
pub struct RoamDefinition {
    pub patrol_radius: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    #[serde(default = "default_patrol_wait")]
    pub patrol_wait_ticks: u32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown_ticks: u32,
}

/// Hostile definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct HostileDefinition {
    pub name: String,
    pub max_health: f32,
    #[serde(default)]
    pub shake_off: Option<ShakeOffDefinition>,
    #[serde(default)]
    pub eater: Option<EaterDefinition>,
    #[serde(default)]
    pub corpse: Option<CorpseDefinition>,
    #[serde(default)]
    pub roam: Option<RoamDefinition>,
}

impl HostileDefinition {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }
}

/// Resource holding all loaded hostile definitions.
#[derive(Resource, Default)]
pub struct HostileRegistry {
    pub definitions: HashMap<String, HostileDefinition>,
}

impl HostileRegistry {
    /// Get a hostile definition by type name.
    pub fn get(&self, hostile_type: &str) -> Option<&HostileDefinition> {
        self.definitions.get(hostile_type)
    }
}

/// Load all hostile definitions from [`HOSTILES_DIR`].
pub fn load_hostile_definitions(mut registry: ResMut<HostileRegistry>) {
    let hostiles_dir = Path::new(HOSTILES_DIR);

    if !hostiles_dir.exists() {
        warn!("Hostile definitions directory not found: {:?}", hostiles_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(hostiles_dir) else {
        warn!("Failed to read hostile definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let hostile_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            let display = path.display().to_string();
            let loaded = fs::read_to_string(&path)
                .map_err(|e| DataLoadError::ReadError {
                    path: display.clone(),
                    details: e.to_string(),
                })
                .and_then(|contents| HostileDefinition::from_ron(&display, &contents));

            match loaded {
                Ok(definition) => {
                    info!("Loaded hostile definition: {} ({})", definition.name, hostile_type);
                    registry.definitions.insert(hostile_type, definition);
                }
                Err(e) => error!("{}", e),
            }
        }
    }

    info!("Loaded {} hostile definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_behaviours_default_to_none() {
        let def = HostileDefinition::from_ron("inline", r#"(name: "Pebble", max_health: 20.0)"#)
            .unwrap();
        assert_eq!(def.name, "Pebble");
        assert!(def.shake_off.is_none());
        assert!(def.eater.is_none());
        assert!(def.corpse.is_none());
        assert!(def.roam.is_none());
    }

    #[test]
    fn full_definition_parses() {
        let def = HostileDefinition::from_ron(
            "inline",
            r#"(
                name: "Bulborb",
                max_health: 200.0,
                shake_off: Some((interval_ticks: 180, max_latched: 5)),
                eater: Some((range: 2.0, eat_ticks: 60)),
                corpse: Some((weight: 5.0, value: 5)),
            )"#,
        )
        .unwrap();
        assert_eq!(def.shake_off.unwrap().max_latched, 5);
        assert_eq!(def.corpse.unwrap().value, 5);
    }

    #[test]
    fn roam_wait_has_a_default() {
        let def = HostileDefinition::from_ron(
            "inline",
            r#"(
                name: "Bulborb",
                max_health: 200.0,
                roam: Some((
                    patrol_radius: 6.0,
                    patrol_speed: 0.03,
                    chase_speed: 0.06,
                    detection_range: 7.0,
                    attack_damage: 10.0,
                    attack_range: 1.5,
                    attack_cooldown_ticks: 90,
                )),
            )"#,
        )
        .unwrap();
        let roam = def.roam.unwrap();
        assert_eq!(roam.patrol_wait_ticks, 120);
        assert_eq!(roam.attack_cooldown_ticks, 90);
    }
}
