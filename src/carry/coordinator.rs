//! The per-load rendezvous protocol.

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Change in who owns the load's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTransition {
    /// Enough carriers: the coordinator now moves the load
    Anchored,
    /// Dropped below the threshold: the load is free again
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Admitted(Option<AnchorTransition>),
    /// Already holding on; nothing changed
    AlreadyMember,
    /// The load has been delivered
    Rejected,
}

impl JoinOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, JoinOutcome::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Removed(Option<AnchorTransition>),
    NotMember,
}

/// Offset of slot `index` when `count` carriers share a ring of `radius`.
pub fn slot_offset(index: usize, count: usize, radius: f32) -> Vec2 {
    let angle = index as f32 * TAU / count.max(1) as f32;
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Membership and anchoring for a single carryable.
///
/// Members are kept in join order; a member's slot is its position in that
/// order, so slots are always `0..N` with no gaps and every change of `N`
/// re-spreads the whole ring.
#[derive(Debug, Clone)]
pub struct CarrierCoordinator {
    members: Vec<Entity>,
    required: usize,
    anchored: bool,
    delivered: bool,
    destination: Option<Entity>,
}

impl CarrierCoordinator {
    pub fn new(required: usize, destination: Option<Entity>) -> Self {
        Self {
            members: Vec::new(),
            required: required.max(1),
            anchored: false,
            delivered: false,
            destination,
        }
    }

    pub fn join(&mut self, unit: Entity) -> JoinOutcome {
        if self.delivered {
            return JoinOutcome::Rejected;
        }
        if self.members.contains(&unit) {
            return JoinOutcome::AlreadyMember;
        }

        self.members.push(unit);
        JoinOutcome::Admitted(self.update_anchor())
    }

    pub fn leave(&mut self, unit: Entity) -> LeaveOutcome {
        let Some(index) = self.members.iter().position(|&m| m == unit) else {
            return LeaveOutcome::NotMember;
        };

        self.members.remove(index);
        LeaveOutcome::Removed(self.update_anchor())
    }

    /// Mark the load delivered and hand back everyone who was carrying it.
    ///
    /// Only the first call returns the members; afterwards this is a no-op.
    pub fn deliver(&mut self) -> Option<Vec<Entity>> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        self.anchored = false;
        Some(std::mem::take(&mut self.members))
    }

    fn update_anchor(&mut self) -> Option<AnchorTransition> {
        let should_anchor = !self.delivered && self.members.len() >= self.required;
        match (self.anchored, should_anchor) {
            (false, true) => {
                self.anchored = true;
                Some(AnchorTransition::Anchored)
            }
            (true, false) => {
                self.anchored = false;
                Some(AnchorTransition::Released)
            }
            _ => None,
        }
    }

    pub fn slot_index(&self, unit: Entity) -> Option<usize> {
        self.members.iter().position(|&m| m == unit)
    }

    /// Every member with its slot index and offset from the load's centre.
    pub fn slot_offsets(&self, radius: f32) -> impl Iterator<Item = (Entity, usize, Vec2)> + '_ {
        let count = self.members.len();
        self.members
            .iter()
            .enumerate()
            .map(move |(index, &unit)| (unit, index, slot_offset(index, count, radius)))
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn destination(&self) -> Option<Entity> {
        self.destination
    }
}
