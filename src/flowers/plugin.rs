//! Flower plugin.

use bevy::prelude::*;

use super::components::PelletDropped;
use super::systems::*;
use crate::combat::apply_damage;
use crate::core::SimSet;

pub struct FlowerPlugin;

impl Plugin for FlowerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PelletDropped>()
            .add_systems(Update, regrow_flowers.in_set(SimSet::Lifecycle))
            // Must see this tick's deaths
            .add_systems(
                Update,
                drop_pellets.after(apply_damage).in_set(SimSet::Cleanup),
            );
    }
}
