//! Keyboard commands for the squad, the onions, and pausing.

use bevy::prelude::*;

use super::components::*;
use crate::combat::Dead;
use crate::core::{horizontal_distance, Misconfigured, SimConfig, SimSet, SimState};
use crate::onion::{Onion, SpawnRequest};
use crate::squad::{ChangeFormation, DismissSquad, FormationKind, Whistle};

pub fn setup_command_systems(app: &mut App) {
    app
        // Pausing must keep working while the tick chain is stopped
        .add_systems(Update, toggle_pause)
        .add_systems(
            Update,
            (squad_commands, onion_commands).in_set(SimSet::Input),
        );
}

/// Space whistles, X dismisses, 1-4 pick a formation.
pub fn squad_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<SimConfig>,
    player_query: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut whistles: EventWriter<Whistle>,
    mut dismissals: EventWriter<DismissSquad>,
    mut formations: EventWriter<ChangeFormation>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Space) {
        whistles.send(Whistle {
            origin: player.translation,
            radius: config.squad.whistle_radius,
        });
    }
    if keyboard.just_pressed(KeyCode::KeyX) {
        dismissals.send(DismissSquad);
    }

    let bindings = [
        (KeyCode::Digit1, FormationKind::Ring),
        (KeyCode::Digit2, FormationKind::Grid),
        (KeyCode::Digit3, FormationKind::Triangle),
        (KeyCode::Digit4, FormationKind::Line),
    ];
    for (key, kind) in bindings {
        if keyboard.just_pressed(key) {
            formations.send(ChangeFormation(kind));
        }
    }
}

/// E asks the nearest onion in reach to release a batch of units.
pub fn onion_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<PlayerConfig>,
    player_query: Query<&Transform, (With<Player>, Without<Dead>)>,
    onions: Query<(Entity, &Onion, &Transform), Without<Misconfigured>>,
    mut requests: EventWriter<SpawnRequest>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok(player) = player_query.get_single() else {
        return;
    };

    let nearest = onions
        .iter()
        .filter(|(_, onion, _)| onion.is_active())
        .map(|(entity, _, transform)| {
            (entity, horizontal_distance(player.translation, transform.translation))
        })
        .filter(|(_, distance)| *distance <= config.onion_reach)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((onion, _)) = nearest {
        requests.send(SpawnRequest {
            onion,
            count: config.spawn_batch,
        });
    }
}

/// Escape toggles the pause.
pub fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<SimState>>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match state.get() {
        SimState::Running => {
            info!("Simulation paused");
            next_state.set(SimState::Paused);
        }
        SimState::Paused => {
            info!("Simulation resumed");
            next_state.set(SimState::Running);
        }
    }
}
