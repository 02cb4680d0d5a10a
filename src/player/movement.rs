//! Player movement and the camera rig.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{Dead, Health};
use crate::core::SimSet;
use crate::squad::Leader;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(Update, player_movement.in_set(SimSet::Input));
}

/// Handle WASD movement: W/S walk along the facing, A/D turn.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (&mut Transform, &mut KinematicCharacterController),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((mut transform, mut controller)) = player_query.get_single_mut() else {
        return;
    };

    let dt = time.delta_secs();

    let mut turn = 0.0;
    if keyboard.pressed(KeyCode::KeyA) {
        turn += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        turn -= 1.0;
    }
    transform.rotate_y(turn * config.turn_speed * dt);

    let mut walk = 0.0;
    if keyboard.pressed(KeyCode::KeyW) {
        walk += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        walk -= 1.0;
    }

    let forward = transform.forward().as_vec3();
    let horizontal = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let movement = horizontal * walk * config.move_speed * dt;

    controller.translation = Some(movement + Vec3::NEG_Y * config.fall_speed * dt);
}

/// Spawn the player with physics components and a trailing camera.
///
/// Roaming hostiles bite the player, so they carry [`Health`] like anything
/// else that can be hurt.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    health: f32,
) -> Entity {
    commands
        .spawn((
            Player,
            Leader,
            Health::new(health),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.9, 0.85, 0.7),
                ..default()
            })),
            Transform::from_translation(position),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.05),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerCamera,
                Camera3d::default(),
                Transform::from_xyz(0.0, 9.0, 11.0).looking_at(Vec3::new(0.0, 0.0, -2.0), Vec3::Y),
            ));
        })
        .id()
}
