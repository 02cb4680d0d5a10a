//! The squad roster.

use bevy::prelude::*;

use super::formation::{formation_offset, FormationKind, FormationParams, FormationSlot};
use crate::core::SquadConfig;

/// Owns the ordered list of registered units and hands out formation slots.
///
/// Insertion order is the slot order. Slots are derived from position in the
/// list, so removing a member compacts everyone behind it with no gaps.
#[derive(Resource, Debug, Clone)]
pub struct SquadManager {
    members: Vec<Entity>,
    max_units: usize,
    formation: FormationKind,
    params: FormationParams,
    leader: Option<Entity>,
}

impl Default for SquadManager {
    fn default() -> Self {
        Self::from_config(&SquadConfig::default())
    }
}

impl SquadManager {
    pub fn new(max_units: usize, formation: FormationKind, params: FormationParams) -> Self {
        Self {
            members: Vec::new(),
            max_units,
            formation,
            params,
            leader: None,
        }
    }

    pub fn from_config(config: &SquadConfig) -> Self {
        Self::new(
            config.max_units,
            config.formation,
            FormationParams::from_config(config),
        )
    }

    /// Add a unit at the back of the formation.
    ///
    /// Returns false, changing nothing, if the roster is full or the unit is
    /// already in it.
    pub fn register(&mut self, unit: Entity) -> bool {
        if self.members.contains(&unit) || self.is_full() {
            return false;
        }
        self.members.push(unit);
        true
    }

    /// Remove a unit if present. Returns whether it was a member.
    pub fn unregister(&mut self, unit: Entity) -> bool {
        let Some(index) = self.members.iter().position(|&m| m == unit) else {
            return false;
        };
        self.members.remove(index);
        true
    }

    /// Register candidates in order until the roster fills up.
    ///
    /// Running out of room part way through is expected; the count of
    /// newly admitted units is returned.
    pub fn bulk_call(&mut self, candidates: impl IntoIterator<Item = Entity>) -> usize {
        let mut admitted = 0;
        for unit in candidates {
            if self.is_full() {
                break;
            }
            if self.register(unit) {
                admitted += 1;
            }
        }
        admitted
    }

    /// Clear the roster, returning the released units. Units are not destroyed.
    pub fn dismiss_all(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.members)
    }

    /// Switch layout. Membership and order are untouched; every offset changes.
    pub fn set_formation(&mut self, formation: FormationKind) {
        self.formation = formation;
    }

    pub fn formation(&self) -> FormationKind {
        self.formation
    }

    pub fn slot_of(&self, unit: Entity) -> Option<FormationSlot> {
        self.members
            .iter()
            .position(|&m| m == unit)
            .map(|index| self.slot_at(index))
    }

    /// Every member with its current slot, in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (Entity, FormationSlot)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(index, &unit)| (unit, self.slot_at(index)))
    }

    fn slot_at(&self, index: usize) -> FormationSlot {
        FormationSlot {
            index,
            offset: formation_offset(index, self.formation, &self.params),
        }
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn contains(&self, unit: Entity) -> bool {
        self.members.contains(&unit)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_units
    }

    pub fn capacity(&self) -> usize {
        self.max_units
    }

    pub fn leader(&self) -> Option<Entity> {
        self.leader
    }

    pub fn set_leader(&mut self, leader: Option<Entity>) {
        self.leader = leader;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(cap: usize) -> SquadManager {
        SquadManager::new(cap, FormationKind::Ring, FormationParams::default())
    }

    fn entities(n: u32) -> Vec<Entity> {
        (0..n).map(Entity::from_raw).collect()
    }

    #[test]
    fn capacity_rejects_overflow_and_reopens_after_unregister() {
        let [a, b, c] = entities(3)[..] else { unreachable!() };
        let mut squad = roster(2);

        assert!(squad.register(a));
        assert!(squad.register(b));
        assert!(!squad.register(c));
        assert_eq!(squad.members(), &[a, b]);

        assert!(squad.unregister(a));
        assert!(squad.register(c));
        assert_eq!(squad.members(), &[b, c]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let a = Entity::from_raw(1);
        let mut squad = roster(5);
        assert!(squad.register(a));
        assert!(!squad.register(a));
        assert_eq!(squad.len(), 1);
    }

    #[test]
    fn roster_never_exceeds_cap() {
        let mut squad = roster(7);
        for unit in entities(50) {
            squad.register(unit);
            assert!(squad.len() <= 7);
        }
        assert!(squad.is_full());
    }

    #[test]
    fn unregister_compacts_slots() {
        let units = entities(4);
        let mut squad = roster(10);
        for &unit in &units {
            squad.register(unit);
        }

        squad.unregister(units[1]);
        squad.unregister(Entity::from_raw(999));

        let indices: Vec<usize> = squad.slots().map(|(_, slot)| slot.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(squad.slot_of(units[3]).map(|s| s.index), Some(2));
        assert_eq!(squad.slot_of(units[1]), None);
    }

    #[test]
    fn bulk_call_admits_until_full() {
        let mut squad = roster(3);
        squad.register(Entity::from_raw(100));

        let admitted = squad.bulk_call(entities(5));
        assert_eq!(admitted, 2);
        assert_eq!(squad.len(), 3);
    }

    #[test]
    fn changing_formation_keeps_membership() {
        let units = entities(6);
        let mut squad = roster(10);
        for &unit in &units {
            squad.register(unit);
        }
        let ring: Vec<Vec2> = squad.slots().map(|(_, s)| s.offset).collect();

        squad.set_formation(FormationKind::Grid);

        assert_eq!(squad.members(), units.as_slice());
        let grid: Vec<Vec2> = squad.slots().map(|(_, s)| s.offset).collect();
        assert_ne!(ring, grid);
        assert_eq!(grid[0], formation_offset(0, FormationKind::Grid, &FormationParams::default()));
    }

    #[test]
    fn dismiss_all_releases_everyone() {
        let units = entities(3);
        let mut squad = roster(10);
        squad.bulk_call(units.clone());

        let released = squad.dismiss_all();
        assert_eq!(released, units);
        assert!(squad.is_empty());
    }
}
