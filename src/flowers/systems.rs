//! Pellet flower systems.

use bevy::prelude::*;

use super::components::*;
use crate::carry::{carryable_bundle, CarryKind};
use crate::combat::Dead;
use crate::core::DeathEvent;
use crate::enemies::Hostile;

/// Flowers knocked down this tick drop their pellet and stop being targets.
pub fn drop_pellets(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut flowers: Query<(&mut PelletFlower, &mut Transform)>,
    mut dropped: EventWriter<PelletDropped>,
) {
    for event in deaths.read() {
        let Ok((mut flower, mut transform)) = flowers.get_mut(event.entity) else {
            continue;
        };
        if !flower.is_blooming() {
            continue;
        }

        flower.wilt();
        transform.scale = Vec3::splat(0.1);

        let pellet = commands
            .spawn(carryable_bundle(
                flower.pellet_weight,
                CarryKind::Pellet {
                    value: flower.pellet_value,
                },
                transform.translation,
            ))
            .id();
        commands.entity(event.entity).remove::<(Hostile, Dead)>();

        info!("Flower {:?} dropped pellet {:?}", event.entity, pellet);
        dropped.send(PelletDropped {
            flower: event.entity,
            pellet,
        });
    }
}

/// Knocked-down flowers grow back and can be attacked again once they bloom.
pub fn regrow_flowers(
    mut commands: Commands,
    mut flowers: Query<(Entity, &mut PelletFlower, &mut Transform)>,
) {
    for (entity, mut flower, mut transform) in flowers.iter_mut() {
        let Some((grown, bloomed)) = flower.tick_regrow() else {
            continue;
        };
        transform.scale = Vec3::splat(grown.max(0.1));

        if bloomed {
            commands.entity(entity).insert(flower.blooming_parts());
            info!("Flower {:?} bloomed again", entity);
        }
    }
}
