//! World plugin - config and level loading, level building, and reloads.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};

use crate::carry::{CarryKind, Carryable};
use crate::core::SimConfig;
use crate::enemies::data::load_hostile_definitions;
use crate::enemies::HostileRegistry;
use crate::player::{spawn_player, Player};
use crate::units::Unit;

use super::builder::{build_level, LevelGeometry};
use super::data::{load_level_definitions, load_sim_config, CurrentLevel, LevelRegistry};
use super::materials::{MaterialRegistry, LOAD_RADIUS};

/// World plugin - handles data loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                load_sim_config,
                load_hostile_definitions,
                load_level_definitions,
                setup_level,
            )
                .chain(),
        )
        .add_systems(Update, (dress_new_units, dress_new_loads, reload_level));
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    hostiles: Res<HostileRegistry>,
    config: Res<SimConfig>,
) {
    let registry = MaterialRegistry::new(&mut meshes, &mut materials);

    spawn_current_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        &registry,
        &level_registry,
        &current_level,
        &hostiles,
        &config,
    );

    commands.insert_resource(registry);
}

#[allow(clippy::too_many_arguments)]
fn spawn_current_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &MaterialRegistry,
    level_registry: &LevelRegistry,
    current_level: &CurrentLevel,
    hostiles: &HostileRegistry,
    config: &SimConfig,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);

    let leader_pos = build_level(commands, meshes, registry, level, hostiles, config);
    spawn_player(commands, meshes, materials, leader_pos, config.squad.leader_health);
}

/// Give units grown by onions a body to draw.
fn dress_new_units(
    mut commands: Commands,
    registry: Option<Res<MaterialRegistry>>,
    units: Query<(Entity, &Unit), (Added<Unit>, Without<Mesh3d>)>,
) {
    let Some(registry) = registry else {
        return;
    };

    for (entity, unit) in units.iter() {
        commands.entity(entity).insert((
            Mesh3d(registry.unit_mesh.clone()),
            MeshMaterial3d(registry.unit(unit.kind)),
            LevelGeometry,
        ));
    }
}

/// Give loads that appear mid-game, like pellets from flowers, a body.
///
/// Corpses keep the hostile's mesh, so only bare entities are dressed.
fn dress_new_loads(
    mut commands: Commands,
    registry: Option<Res<MaterialRegistry>>,
    loads: Query<(Entity, &Carryable), (Added<Carryable>, Without<Mesh3d>)>,
) {
    let Some(registry) = registry else {
        return;
    };

    for (entity, carryable) in loads.iter() {
        let material = match carryable.kind {
            CarryKind::Treasure { .. } => registry.treasure.clone(),
            _ => registry.pellet.clone(),
        };
        commands.entity(entity).insert((
            Mesh3d(registry.load_mesh.clone()),
            MeshMaterial3d(material),
            RigidBody::Dynamic,
            Collider::ball(LOAD_RADIUS),
            LevelGeometry,
        ));
    }
}

/// R tears the level down and builds it again from its definition.
#[allow(clippy::too_many_arguments)]
fn reload_level(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Option<Res<MaterialRegistry>>,
    spawned: Query<Entity, Or<(With<LevelGeometry>, With<Player>)>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    hostiles: Res<HostileRegistry>,
    config: Res<SimConfig>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Some(registry) = registry else {
        return;
    };

    for entity in spawned.iter() {
        commands.entity(entity).despawn_recursive();
    }

    info!("Reloading level '{}'", current_level.name);
    spawn_current_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        &registry,
        &level_registry,
        &current_level,
        &hostiles,
        &config,
    );
}
