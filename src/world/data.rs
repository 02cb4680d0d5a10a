//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::{DataLoadError, SimConfig, SimRng, SIM_CONFIG_PATH};
use crate::squad::SquadManager;
use crate::units::UnitKind;

/// Directory holding one `.ron` file per level.
pub const LEVELS_DIR: &str = "assets/data/levels";

#[derive(Debug, Clone, Deserialize)]
pub struct OnionPlacement {
    pub kind: UnitKind,
    pub position: (f32, f32, f32),
    #[serde(default = "default_onion_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub stored: u32,
    /// Starts underground until the leader walks close
    #[serde(default)]
    pub buried: bool,
}

fn default_onion_capacity() -> u32 {
    50
}

/// A pellet or a treasure lying in the level.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadPlacement {
    pub position: (f32, f32, f32),
    pub weight: f32,
    pub value: u32,
    /// Treasures only: starts underground until found and dug out
    #[serde(default)]
    pub buried: bool,
}

/// A pellet flower. Knocked down, it drops a pellet and grows back.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowerPlacement {
    pub position: (f32, f32, f32),
    #[serde(default = "default_pellet_weight")]
    pub pellet_weight: f32,
    #[serde(default = "default_pellet_value")]
    pub pellet_value: u32,
    #[serde(default = "default_flower_health")]
    pub health: f32,
    #[serde(default = "default_regrow_ticks")]
    pub regrow_ticks: u32,
}

fn default_pellet_weight() -> f32 {
    1.0
}

fn default_pellet_value() -> u32 {
    1
}

fn default_flower_health() -> f32 {
    5.0
}

fn default_regrow_ticks() -> u32 {
    1800
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostilePlacement {
    /// Name of a file in `assets/data/hostiles/`
    pub hostile_type: String,
    pub position: (f32, f32, f32),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HazardPlacement {
    /// Hazard kind name, e.g. "fire", "electricity", "ice"
    pub kind: String,
    pub position: (f32, f32, f32),
    pub radius: f32,
    #[serde(default)]
    pub damage_per_tick: Option<f32>,
    /// Hazards with health can be neutralized
    #[serde(default)]
    pub health: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitPlacement {
    pub kind: UnitKind,
    pub position: (f32, f32, f32),
}

/// Complete level definition loaded from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default = "default_ground_size")]
    pub ground_size: f32,
    pub leader_start: (f32, f32, f32),
    #[serde(default)]
    pub onions: Vec<OnionPlacement>,
    #[serde(default)]
    pub pellets: Vec<LoadPlacement>,
    #[serde(default)]
    pub treasures: Vec<LoadPlacement>,
    #[serde(default)]
    pub flowers: Vec<FlowerPlacement>,
    #[serde(default)]
    pub hostiles: Vec<HostilePlacement>,
    #[serde(default)]
    pub hazards: Vec<HazardPlacement>,
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
}

fn default_ground_size() -> f32 {
    60.0
}

impl LevelDefinition {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&display, &contents)
    }
}

/// Convert a RON position tuple to a vector.
pub fn to_vec3((x, y, z): (f32, f32, f32)) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Resource storing all loaded levels.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "garden".to_string(),
        }
    }
}

/// Replace the default config with `assets/data/simulation.ron` if present.
///
/// Runs before anything is spawned, so the roster and RNG are rebuilt from it.
/// A missing file keeps the defaults; a broken one is reported and ignored.
pub fn load_sim_config(mut commands: Commands) {
    let path = Path::new(SIM_CONFIG_PATH);

    match SimConfig::load(path) {
        Ok(config) => {
            info!("Loaded simulation config (seed {})", config.seed);
            commands.insert_resource(SimRng::from_seed(config.seed));
            commands.insert_resource(SquadManager::from_config(&config.squad));
            commands.insert_resource(config);
        }
        Err(DataLoadError::FileNotFound(_)) => {
            warn!("{} not found, using default simulation config", SIM_CONFIG_PATH);
        }
        Err(e) => {
            error!("{}; using default simulation config", e);
        }
    }
}

/// Load all level definitions from [`LEVELS_DIR`].
pub fn load_level_definitions(mut commands: Commands) {
    let mut registry = LevelRegistry::default();

    let levels_path = Path::new(LEVELS_DIR);

    if levels_path.exists() {
        if let Ok(entries) = fs::read_dir(levels_path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "ron") {
                    if let Some(stem) = path.file_stem() {
                        let level_name = stem.to_string_lossy().to_string();

                        match LevelDefinition::load(&path) {
                            Ok(level) => {
                                info!("Loaded level: {}", level_name);
                                registry.levels.insert(level_name, level);
                            }
                            Err(e) => {
                                error!("Failed to load level: {}", e);
                            }
                        }
                    }
                }
            }
        }
    } else {
        warn!("Levels directory not found: {:?}", levels_path);
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.init_resource::<CurrentLevel>();
}
