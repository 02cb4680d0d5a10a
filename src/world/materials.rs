//! Meshes and materials shared by everything the level spawns.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::units::{HazardKind, UnitKind};

/// Size of loads that did not come from the level file.
pub const LOAD_RADIUS: f32 = 0.35;

fn unit_color(kind: UnitKind) -> Color {
    match kind {
        UnitKind::Red => Color::srgb(0.85, 0.15, 0.12),
        UnitKind::Blue => Color::srgb(0.15, 0.3, 0.85),
        UnitKind::Yellow => Color::srgb(0.95, 0.85, 0.15),
        UnitKind::White => Color::srgb(0.92, 0.92, 0.95),
        UnitKind::Dark => Color::srgb(0.25, 0.15, 0.35),
    }
}

fn hazard_color(kind: HazardKind) -> Color {
    match kind {
        HazardKind::Fire => Color::srgba(1.0, 0.35, 0.05, 0.5),
        HazardKind::Water => Color::srgba(0.1, 0.35, 0.9, 0.5),
        HazardKind::Electric => Color::srgba(1.0, 0.95, 0.3, 0.5),
        HazardKind::Poison => Color::srgba(0.6, 0.2, 0.8, 0.5),
        HazardKind::Cold => Color::srgba(0.7, 0.9, 1.0, 0.5),
        HazardKind::Dark => Color::srgba(0.05, 0.05, 0.1, 0.6),
    }
}

/// Handles for every kind of thing placed in a level.
///
/// Kept as a resource so units grown by onions can be dressed after the
/// level is built.
#[derive(Resource)]
pub struct MaterialRegistry {
    units: HashMap<UnitKind, Handle<StandardMaterial>>,
    hazards: HashMap<HazardKind, Handle<StandardMaterial>>,
    pub ground: Handle<StandardMaterial>,
    pub pellet: Handle<StandardMaterial>,
    pub treasure: Handle<StandardMaterial>,
    pub hostile: Handle<StandardMaterial>,
    pub flower: Handle<StandardMaterial>,
    pub unit_mesh: Handle<Mesh>,
    /// Loads spawned while playing, like pellets from flowers
    pub load_mesh: Handle<Mesh>,
}

impl MaterialRegistry {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let units = UnitKind::ALL
            .iter()
            .map(|&kind| {
                let handle = materials.add(StandardMaterial {
                    base_color: unit_color(kind),
                    perceptual_roughness: 0.6,
                    ..default()
                });
                (kind, handle)
            })
            .collect();

        let hazards = [
            HazardKind::Fire,
            HazardKind::Water,
            HazardKind::Electric,
            HazardKind::Poison,
            HazardKind::Cold,
            HazardKind::Dark,
        ]
        .iter()
        .map(|&kind| {
            let handle = materials.add(StandardMaterial {
                base_color: hazard_color(kind),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            (kind, handle)
        })
        .collect();

        // Grass
        let ground = materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.5, 0.22),
            perceptual_roughness: 0.95,
            ..default()
        });

        let pellet = materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.6, 0.2),
            perceptual_roughness: 0.4,
            ..default()
        });

        let treasure = materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.7, 0.25),
            perceptual_roughness: 0.25,
            metallic: 0.9,
            ..default()
        });

        let hostile = materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.35, 0.4),
            perceptual_roughness: 0.7,
            ..default()
        });

        let flower = materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.45, 0.7),
            perceptual_roughness: 0.8,
            ..default()
        });

        Self {
            units,
            hazards,
            ground,
            pellet,
            treasure,
            hostile,
            flower,
            unit_mesh: meshes.add(Capsule3d::new(0.15, 0.3)),
            load_mesh: meshes.add(Sphere::new(LOAD_RADIUS)),
        }
    }

    /// Material for a unit of the given kind.
    pub fn unit(&self, kind: UnitKind) -> Handle<StandardMaterial> {
        self.units.get(&kind).cloned().unwrap_or_default()
    }

    pub fn hazard(&self, kind: HazardKind) -> Handle<StandardMaterial> {
        self.hazards.get(&kind).cloned().unwrap_or_default()
    }
}
