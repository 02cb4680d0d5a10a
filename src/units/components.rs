//! Unit components and the per-unit state machine.

use bevy::prelude::*;

use super::capabilities::UnitKind;
use crate::core::TickTimer;

/// Marker for every follower unit, carrying its kind.
#[derive(Component, Debug, Clone, Copy)]
pub struct Unit {
    pub kind: UnitKind,
}

/// What a unit is doing this tick. Exactly one state at a time.
///
/// `Following` is the free state: registered units walk to their formation
/// spot, unregistered ones idle. Task states point at the entity involved.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum UnitState {
    /// In the air (thrown, flung off a hostile); waits for ground contact
    #[default]
    Airborne,
    /// Touched down; becomes controllable when the settle timer runs out
    Landed(TickTimer),
    /// Free and looking for work
    Following,
    /// Holding a slot on a carryable
    Attached(Entity),
    /// Walking toward a hostile
    Approaching(Entity),
    /// Standing next to a hostile, hitting it
    Attacking(Entity),
    /// Clinging to a hostile, hitting it
    Latched(Entity),
    /// Digging out a buried load
    Digging(Entity),
    /// Frozen solid by a cold hazard
    Frozen(TickTimer),
}

impl UnitState {
    pub fn is_following(&self) -> bool {
        matches!(self, UnitState::Following)
    }

    /// The carryable this unit holds, if any.
    pub fn carried(&self) -> Option<Entity> {
        match self {
            UnitState::Attached(carryable) => Some(*carryable),
            _ => None,
        }
    }

    /// The hostile this unit is engaging, if any.
    pub fn combat_target(&self) -> Option<Entity> {
        match self {
            UnitState::Approaching(target)
            | UnitState::Attacking(target)
            | UnitState::Latched(target) => Some(*target),
            _ => None,
        }
    }

    /// Standing on the ground and able to act (or be grabbed).
    pub fn is_grounded(&self) -> bool {
        !matches!(self, UnitState::Airborne | UnitState::Latched(_))
    }
}

/// Simple velocity used while airborne and while settling after a landing.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ballistic {
    pub velocity: Vec3,
}

/// Rising out of the ground after being spawned. AI is off until it finishes.
#[derive(Component, Debug, Clone)]
pub struct Emerging {
    pub timer: TickTimer,
    pub from_height: f32,
    pub to_height: f32,
    /// Onion that produced this unit
    pub onion: Option<Entity>,
}

/// Sent when a unit finishes emerging and becomes tick-active.
#[derive(Event, Debug, Clone)]
pub struct UnitEmerged {
    pub unit: Entity,
    pub onion: Option<Entity>,
}
