//! Carry components and events.

use bevy::prelude::*;

use super::coordinator::{AnchorTransition, CarrierCoordinator, JoinOutcome, LeaveOutcome};
use crate::core::ConfigError;

/// What a load turns into once it reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryKind {
    /// Numbered pellet; its value becomes new units at the onion
    Pellet { value: u32 },
    /// Remains of a defeated hostile
    Corpse { value: u32 },
    /// Collected on arrival, never absorbed
    Treasure { value: u32 },
}

impl CarryKind {
    pub fn value(&self) -> u32 {
        match self {
            CarryKind::Pellet { value }
            | CarryKind::Corpse { value }
            | CarryKind::Treasure { value } => *value,
        }
    }

    /// Whether an onion turns this load into units.
    pub fn yields_units(&self) -> bool {
        !matches!(self, CarryKind::Treasure { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarryState {
    #[default]
    Idle,
    BeingCarried,
    /// Terminal
    Delivered,
}

/// Something units can pick up and haul.
///
/// The coordinator slot is empty until the first unit asks to join and is
/// cleared again when the last one lets go.
#[derive(Component, Debug, Clone)]
pub struct Carryable {
    pub weight: f32,
    pub kind: CarryKind,
    state: CarryState,
    coordinator: Option<CarrierCoordinator>,
}

impl Carryable {
    pub fn new(weight: f32, kind: CarryKind) -> Self {
        Self {
            weight,
            kind,
            state: CarryState::Idle,
            coordinator: None,
        }
    }

    pub fn pellet(weight: f32, value: u32) -> Self {
        Self::new(weight, CarryKind::Pellet { value })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weight.is_finite() && self.weight > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidWeight(self.weight))
        }
    }

    /// Number of carriers needed before the load moves.
    pub fn required_carriers(&self) -> usize {
        (self.weight.ceil() as usize).max(1)
    }

    pub fn state(&self) -> CarryState {
        self.state
    }

    pub fn coordinator(&self) -> Option<&CarrierCoordinator> {
        self.coordinator.as_ref()
    }

    pub fn carrier_count(&self) -> usize {
        self.coordinator.as_ref().map_or(0, CarrierCoordinator::len)
    }

    pub fn destination(&self) -> Option<Entity> {
        self.coordinator.as_ref().and_then(CarrierCoordinator::destination)
    }

    /// Idle loads still take carriers; moving or delivered ones don't.
    pub fn accepts_carriers(&self) -> bool {
        self.state == CarryState::Idle
    }

    /// Ask to join the load's carrier group.
    ///
    /// `destination` is only called when this request creates the
    /// coordinator, so the delivery point is chosen exactly once.
    pub fn request_join(
        &mut self,
        unit: Entity,
        destination: impl FnOnce() -> Option<Entity>,
    ) -> JoinOutcome {
        if self.state == CarryState::Delivered {
            return JoinOutcome::Rejected;
        }

        let required = self.required_carriers();
        let coordinator = self
            .coordinator
            .get_or_insert_with(|| CarrierCoordinator::new(required, destination()));
        let outcome = coordinator.join(unit);
        self.sync_state();
        outcome
    }

    pub fn request_leave(&mut self, unit: Entity) -> LeaveOutcome {
        let Some(coordinator) = self.coordinator.as_mut() else {
            return LeaveOutcome::NotMember;
        };

        let outcome = coordinator.leave(unit);
        if coordinator.is_empty() {
            self.coordinator = None;
        }
        self.sync_state();
        outcome
    }

    /// Finish the carry. Returns the released carriers the first time only.
    pub fn deliver(&mut self) -> Option<Vec<Entity>> {
        if self.state == CarryState::Delivered {
            return None;
        }
        let released = self.coordinator.take()?.deliver()?;
        self.state = CarryState::Delivered;
        Some(released)
    }

    fn sync_state(&mut self) {
        if self.state == CarryState::Delivered {
            return;
        }
        self.state = match &self.coordinator {
            Some(coordinator) if coordinator.is_anchored() => CarryState::BeingCarried,
            _ => CarryState::Idle,
        };
    }
}

/// Who moves the load.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionAuthority {
    /// Physics (gravity, pushes)
    #[default]
    Free,
    /// Its carrier group
    Coordinator,
    /// The onion drawing it in
    Absorbed,
}

/// A unit's link to the load it carries.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CarrierAgent {
    pub attached: Option<Entity>,
    pub slot: Option<usize>,
    /// Where to stand relative to the load's centre, on the ground plane
    pub offset: Vec2,
}

impl CarrierAgent {
    pub fn attach(&mut self, carryable: Entity) {
        self.attached = Some(carryable);
    }

    pub fn detach(&mut self) {
        *self = Self::default();
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }
}

/// Unit asks to join a carryable's group.
#[derive(Event, Debug, Clone, Copy)]
pub struct CarryJoinRequest {
    pub unit: Entity,
    pub carryable: Entity,
}

/// Unit lets go of whatever it carries. Harmless if it carries nothing.
#[derive(Event, Debug, Clone, Copy)]
pub struct CarryLeaveRequest {
    pub unit: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct AnchorChanged {
    pub carryable: Entity,
    pub transition: AnchorTransition,
    pub carriers: usize,
}

/// A unit-yielding load was accepted by an onion.
#[derive(Event, Debug, Clone, Copy)]
pub struct CarryDelivered {
    pub carryable: Entity,
    pub onion: Entity,
    pub kind: CarryKind,
    pub carriers: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TreasureCollected {
    pub carryable: Entity,
    pub value: u32,
}

/// Components for a loose carryable at `position`.
pub fn carryable_bundle(weight: f32, kind: CarryKind, position: Vec3) -> impl Bundle {
    (
        Carryable::new(weight, kind),
        MotionAuthority::Free,
        Transform::from_translation(position),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn required_carriers_rounds_weight_up() {
        assert_eq!(Carryable::pellet(1.0, 1).required_carriers(), 1);
        assert_eq!(Carryable::pellet(2.2, 1).required_carriers(), 3);
        assert_eq!(Carryable::pellet(0.4, 1).required_carriers(), 1);
    }

    #[test]
    fn invalid_weights_are_config_errors() {
        assert!(Carryable::pellet(1.0, 1).validate().is_ok());
        assert_eq!(
            Carryable::pellet(0.0, 1).validate(),
            Err(ConfigError::InvalidWeight(0.0))
        );
        assert!(Carryable::pellet(f32::NAN, 1).validate().is_err());
        assert!(Carryable::pellet(-2.0, 1).validate().is_err());
    }

    #[test]
    fn destination_is_resolved_once() {
        let lookups = Cell::new(0);
        let onion = Entity::from_raw(50);
        let mut carryable = Carryable::pellet(5.0, 5);

        for raw in 1..=3 {
            carryable.request_join(Entity::from_raw(raw), || {
                lookups.set(lookups.get() + 1);
                Some(onion)
            });
        }

        assert_eq!(lookups.get(), 1);
        assert_eq!(carryable.destination(), Some(onion));
    }

    #[test]
    fn coordinator_is_torn_down_when_empty() {
        let unit = Entity::from_raw(1);
        let mut carryable = Carryable::pellet(1.0, 1);

        carryable.request_join(unit, || None);
        assert_eq!(carryable.state(), CarryState::BeingCarried);

        assert_eq!(
            carryable.request_leave(unit),
            LeaveOutcome::Removed(Some(AnchorTransition::Released))
        );
        assert!(carryable.coordinator().is_none());
        assert_eq!(carryable.state(), CarryState::Idle);
        assert_eq!(carryable.request_leave(unit), LeaveOutcome::NotMember);
    }

    #[test]
    fn delivered_loads_refuse_new_carriers() {
        let unit = Entity::from_raw(1);
        let mut carryable = Carryable::new(1.0, CarryKind::Treasure { value: 30 });
        carryable.request_join(unit, || None);

        assert_eq!(carryable.deliver(), Some(vec![unit]));
        assert_eq!(carryable.deliver(), None);
        assert_eq!(carryable.state(), CarryState::Delivered);
        assert_eq!(
            carryable.request_join(Entity::from_raw(2), || None),
            JoinOutcome::Rejected
        );
        assert!(!carryable.accepts_carriers());
    }
}
