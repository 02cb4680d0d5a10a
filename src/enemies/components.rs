//! Hostile components.

use bevy::prelude::*;

use crate::core::{horizontal_distance, TickTimer};

/// Marker for anything units will attack.
#[derive(Component, Debug, Clone)]
pub struct Hostile {
    pub name: String,
}

/// Periodically tries to throw off latched units.
#[derive(Component, Debug, Clone)]
pub struct ShakeOff {
    /// Runs only while at least one unit is latched
    pub timer: TickTimer,
    /// This many latched units force a shake right away
    pub max_latched: usize,
}

impl ShakeOff {
    pub fn new(interval: u32, max_latched: usize) -> Self {
        Self {
            timer: TickTimer::new(interval),
            max_latched,
        }
    }
}

/// Grabs a free unit within reach and eats it after a delay.
#[derive(Component, Debug, Clone)]
pub struct Eater {
    pub range: f32,
    pub timer: TickTimer,
    pub victim: Option<Entity>,
}

impl Eater {
    pub fn new(range: f32, eat_ticks: u32) -> Self {
        Self {
            range,
            timer: TickTimer::new(eat_ticks),
            victim: None,
        }
    }
}

/// On death the hostile becomes a carryable corpse instead of disappearing.
#[derive(Component, Debug, Clone, Copy)]
pub struct CorpseYield {
    pub weight: f32,
    pub value: u32,
}

/// A latched unit was thrown off.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShakenOff {
    pub unit: Entity,
    pub hostile: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UnitEaten {
    pub unit: Entity,
    pub eater: Entity,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Patrolling,
    Chasing,
    Attacking,
}

/// How a roaming hostile moves and bites.
#[derive(Component, Debug, Clone, Copy)]
pub struct HostileStats {
    pub damage: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
}

/// Territory a roaming hostile wanders and will not leave.
#[derive(Component, Debug, Clone, Copy)]
pub struct Patrol {
    pub home: Vec3,
    pub radius: f32,
    /// Current wander point, if any
    pub target: Option<Vec3>,
    /// Pause between wander points
    pub wait: TickTimer,
}

impl Patrol {
    pub fn new(home: Vec3, radius: f32, wait_ticks: u32) -> Self {
        Self {
            home,
            radius,
            target: None,
            wait: TickTimer::finished_after(wait_ticks),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        horizontal_distance(self.home, point) <= self.radius
    }

    /// Pull `point` back inside the territory, keeping its height.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        let offset = Vec2::new(point.x - self.home.x, point.z - self.home.z);
        if offset.length() <= self.radius {
            return point;
        }
        let edge = offset.normalize_or_zero() * self.radius;
        Vec3::new(self.home.x + edge.x, point.y, self.home.z + edge.y)
    }
}

/// Cooldown between bites.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackTimer(pub TickTimer);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_points_inside_the_territory() {
        let patrol = Patrol::new(Vec3::new(1.0, 0.0, 1.0), 2.0, 10);
        let inside = Vec3::new(2.0, 0.5, 1.0);
        assert_eq!(patrol.clamp(inside), inside);

        let clamped = patrol.clamp(Vec3::new(6.0, 0.5, 1.0));
        assert!((clamped - Vec3::new(3.0, 0.5, 1.0)).length() < 1e-5);
        assert!(patrol.contains(clamped));
    }
}
