//! Level construction from data definitions.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};

use super::data::{to_vec3, LevelDefinition};
use super::materials::MaterialRegistry;
use crate::carry::{carryable_bundle, CarryKind};
use crate::combat::Health;
use crate::core::SimConfig;
use crate::enemies::{spawn_hostile, HostileRegistry};
use crate::flowers::{pellet_flower_bundle, PelletFlower};
use crate::hazards::Hazard;
use crate::onion::onion_bundle;
use crate::treasure::buried_treasure_bundle;
use crate::units::{unit_bundle, HazardKind, UnitState};

/// Marker for everything the level spawned, for cleanup.
#[derive(Component)]
pub struct LevelGeometry;

/// Build a level from a level definition. Returns where the leader starts.
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
    hostiles: &HostileRegistry,
    config: &SimConfig,
) -> Vec3 {
    setup_environment(commands, meshes, registry, level, config.world.ground_height);

    spawn_onions(commands, meshes, level, config);
    spawn_loads(commands, meshes, registry, level, config);
    spawn_flowers(commands, meshes, registry, level);
    spawn_hostiles(commands, meshes, registry, level, hostiles);
    spawn_hazards(commands, meshes, registry, level);

    for placement in &level.units {
        commands.spawn((
            unit_bundle(
                placement.kind,
                to_vec3(placement.position),
                UnitState::Following,
                config,
            ),
            Mesh3d(registry.unit_mesh.clone()),
            MeshMaterial3d(registry.unit(placement.kind)),
            LevelGeometry,
        ));
    }

    to_vec3(level.leader_start)
}

/// Ground plane, sun, and ambient light.
fn setup_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
    ground_height: f32,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.95, 1.0),
        brightness: 400.0,
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.97, 0.9),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelGeometry,
    ));

    let half = level.ground_size / 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(level.ground_size, level.ground_size))),
        MeshMaterial3d(registry.ground.clone()),
        Transform::from_xyz(0.0, ground_height, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(half, 0.05, half),
        LevelGeometry,
    ));
}

fn spawn_onions(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    level: &LevelDefinition,
    config: &SimConfig,
) {
    let mesh = meshes.add(Cone {
        radius: 1.2,
        height: 2.0,
    });

    for placement in &level.onions {
        let (onion, transform) = onion_bundle(
            placement.kind,
            to_vec3(placement.position),
            placement.capacity,
            placement.buried,
            &config.onion,
        );
        commands.spawn((
            onion.with_stored(placement.stored),
            transform,
            Mesh3d(mesh.clone()),
            LevelGeometry,
        ));
    }
}

/// Pellets and treasures. Both sit on the ground as dynamic bodies until carried.
///
/// Buried treasures stay kinematic underground until they have been dug out.
fn spawn_loads(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
    config: &SimConfig,
) {
    let pellets = level
        .pellets
        .iter()
        .map(|p| (p, CarryKind::Pellet { value: p.value }, &registry.pellet));
    let treasures = level
        .treasures
        .iter()
        .map(|p| (p, CarryKind::Treasure { value: p.value }, &registry.treasure));

    for (placement, kind, material) in pellets.chain(treasures) {
        // Heavier loads are drawn bigger
        let radius = 0.25 + 0.1 * placement.weight.max(0.0).sqrt();
        let position = to_vec3(placement.position);
        let looks = (
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(material.clone()),
            Collider::ball(radius),
            LevelGeometry,
        );

        match kind {
            CarryKind::Treasure { value } if placement.buried => {
                commands.spawn((
                    buried_treasure_bundle(placement.weight, value, position, &config.treasure),
                    RigidBody::KinematicPositionBased,
                    looks,
                ));
            }
            _ => {
                commands.spawn((
                    carryable_bundle(placement.weight, kind, position),
                    RigidBody::Dynamic,
                    looks,
                ));
            }
        }
    }
}

fn spawn_flowers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
) {
    let mesh = meshes.add(Cone {
        radius: 0.5,
        height: 1.2,
    });

    for placement in &level.flowers {
        let flower = PelletFlower::new(
            placement.pellet_weight,
            placement.pellet_value,
            placement.health,
            placement.regrow_ticks,
        );
        commands.spawn((
            pellet_flower_bundle(flower, to_vec3(placement.position)),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(registry.flower.clone()),
            LevelGeometry,
        ));
    }
}

fn spawn_hostiles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
    hostiles: &HostileRegistry,
) {
    let mesh = meshes.add(Sphere::new(1.0));

    for placement in &level.hostiles {
        let Some(definition) = hostiles.get(&placement.hostile_type) else {
            warn!(
                "Unknown hostile type '{}' in level '{}'",
                placement.hostile_type, level.name
            );
            continue;
        };

        let entity = spawn_hostile(commands, definition, to_vec3(placement.position));
        commands.entity(entity).insert((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(registry.hostile.clone()),
            LevelGeometry,
        ));
    }
}

fn spawn_hazards(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &MaterialRegistry,
    level: &LevelDefinition,
) {
    for placement in &level.hazards {
        let kind = match placement.kind.parse::<HazardKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Skipping hazard in level '{}': {}", level.name, e);
                continue;
            }
        };

        let mut hazard = Hazard::new(kind, placement.radius);
        if let Some(damage) = placement.damage_per_tick {
            hazard.damage_per_tick = damage;
        }

        let mut entity = commands.spawn((
            hazard,
            Mesh3d(meshes.add(Cylinder::new(placement.radius, 0.1))),
            MeshMaterial3d(registry.hazard(kind)),
            Transform::from_translation(to_vec3(placement.position)),
            NotShadowCaster,
            LevelGeometry,
        ));
        if let Some(health) = placement.health {
            entity.insert(Health::new(health));
        }
    }
}
