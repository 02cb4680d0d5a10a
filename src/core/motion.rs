//! Small helpers for movement on the ground plane.
//!
//! All distances used by gameplay are horizontal (XZ), so a load lifted to
//! carry height still measures the same distance to its destination.

use bevy::prelude::*;

/// Distance between two points ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.z - a.z).length()
}

/// Step `from` toward `to` on the XZ plane by at most `max_step`, keeping `from.y`.
pub fn step_towards_horizontal(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = Vec2::new(to.x - from.x, to.z - from.z);
    let distance = delta.length();

    if distance <= max_step || distance <= f32::EPSILON {
        return Vec3::new(to.x, from.y, to.z);
    }

    let step = delta / distance * max_step;
    Vec3::new(from.x + step.x, from.y, from.z + step.y)
}

/// Lift a ground-plane offset into world space.
pub fn ground_offset(offset: Vec2) -> Vec3 {
    Vec3::new(offset.x, 0.0, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 5.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn step_does_not_overshoot() {
        let from = Vec3::new(0.0, 1.0, 0.0);
        let to = Vec3::new(0.5, 0.0, 0.0);
        assert_eq!(step_towards_horizontal(from, to, 2.0), Vec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn step_moves_exact_amount() {
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);
        let next = step_towards_horizontal(from, to, 1.5);
        assert!((next.x - 1.5).abs() < 1e-5);
        assert_eq!(next.z, 0.0);
    }
}
