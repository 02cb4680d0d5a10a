//! Hostile spawning from definitions.

use bevy::prelude::*;

use super::components::{
    AiState, AttackTimer, CorpseYield, Eater, Hostile, HostileStats, Patrol, ShakeOff,
};
use super::data::HostileDefinition;
use crate::combat::Health;
use crate::core::TickTimer;

/// Spawn a hostile described by `definition` at `position`.
pub fn spawn_hostile(
    commands: &mut Commands,
    definition: &HostileDefinition,
    position: Vec3,
) -> Entity {
    let mut entity = commands.spawn((
        Hostile {
            name: definition.name.clone(),
        },
        Health::new(definition.max_health),
        Transform::from_translation(position),
    ));

    if let Some(shake) = &definition.shake_off {
        entity.insert(ShakeOff::new(shake.interval_ticks, shake.max_latched));
    }
    if let Some(eater) = &definition.eater {
        entity.insert(Eater::new(eater.range, eater.eat_ticks));
    }
    if let Some(corpse) = &definition.corpse {
        entity.insert(CorpseYield {
            weight: corpse.weight,
            value: corpse.value,
        });
    }

    if let Some(roam) = &definition.roam {
        entity.insert((
            AiState::default(),
            HostileStats {
                damage: roam.attack_damage,
                patrol_speed: roam.patrol_speed,
                chase_speed: roam.chase_speed,
                detection_range: roam.detection_range,
                attack_range: roam.attack_range,
            },
            Patrol::new(position, roam.patrol_radius, roam.patrol_wait_ticks),
            AttackTimer(TickTimer::new(roam.attack_cooldown_ticks)),
        ));
    }

    entity.id()
}
