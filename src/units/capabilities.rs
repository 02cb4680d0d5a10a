//! Per-kind capability table.
//!
//! Each unit gets its [`Capabilities`] once, at construction, from its
//! [`UnitKind`]. Hazards and combat consult it; nothing re-derives it per tick.

use bevy::prelude::*;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// The colour of a unit, which decides its capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UnitKind {
    Red,
    Blue,
    Yellow,
    White,
    Dark,
}

impl UnitKind {
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Red,
        UnitKind::Blue,
        UnitKind::Yellow,
        UnitKind::White,
        UnitKind::Dark,
    ];
}

/// Environmental hazard categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum HazardKind {
    Fire,
    Water,
    #[serde(alias = "Electricity")]
    Electric,
    Poison,
    #[serde(alias = "Ice")]
    Cold,
    #[serde(alias = "Darkness")]
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hazard kind '{0}'")]
pub struct UnknownHazard(pub String);

impl FromStr for HazardKind {
    type Err = UnknownHazard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fire" => Ok(HazardKind::Fire),
            "water" => Ok(HazardKind::Water),
            "electric" | "electricity" => Ok(HazardKind::Electric),
            "poison" => Ok(HazardKind::Poison),
            "cold" | "ice" => Ok(HazardKind::Cold),
            "dark" | "darkness" => Ok(HazardKind::Dark),
            _ => Err(UnknownHazard(s.to_string())),
        }
    }
}

/// Jobs a unit may or may not be able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Carry,
    Fight,
    Swim,
    Dig,
    FindTreasure,
}

/// What a unit can survive and how strong it is.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub kind: UnitKind,
    pub resists: Vec<HazardKind>,
    pub can_swim: bool,
    pub can_dig: bool,
    /// Reveals buried treasure nearby
    pub can_find_treasure: bool,
    pub strength: f32,
    pub speed: f32,
    pub jump: f32,
    /// Extra melee multiplier on top of strength
    pub attack_bonus: f32,
    /// Damage dealt to whatever eats this unit
    pub poison_when_eaten: Option<f32>,
    /// Hazard this unit wears down while standing in it
    pub neutralizes: Option<HazardKind>,
}

impl Capabilities {
    fn base(kind: UnitKind) -> Self {
        Self {
            kind,
            resists: Vec::new(),
            can_swim: false,
            can_dig: false,
            can_find_treasure: false,
            strength: 1.0,
            speed: 1.0,
            jump: 1.0,
            attack_bonus: 1.0,
            poison_when_eaten: None,
            neutralizes: None,
        }
    }

    /// The built-in capability set of a unit kind.
    pub fn for_kind(kind: UnitKind) -> Self {
        let base = Self::base(kind);
        match kind {
            UnitKind::Red => Self {
                resists: vec![HazardKind::Fire],
                strength: 1.5,
                attack_bonus: 1.5,
                neutralizes: Some(HazardKind::Fire),
                ..base
            },
            UnitKind::Blue => Self {
                resists: vec![HazardKind::Water],
                can_swim: true,
                ..base
            },
            UnitKind::Yellow => Self {
                resists: vec![HazardKind::Electric],
                jump: 3.0,
                can_dig: true,
                neutralizes: Some(HazardKind::Electric),
                ..base
            },
            UnitKind::White => Self {
                resists: vec![HazardKind::Poison],
                can_dig: true,
                can_find_treasure: true,
                speed: 1.5,
                poison_when_eaten: Some(50.0),
                neutralizes: Some(HazardKind::Poison),
                ..base
            },
            UnitKind::Dark => Self {
                resists: vec![HazardKind::Dark],
                strength: 1.2,
                speed: 1.1,
                neutralizes: Some(HazardKind::Dark),
                ..base
            },
        }
    }

    /// Pure predicate consulted by hazards; never has side effects.
    pub fn can_survive_hazard(&self, hazard: HazardKind) -> bool {
        self.resists.contains(&hazard) || (hazard == HazardKind::Water && self.can_swim)
    }

    pub fn can_perform_task(&self, task: TaskKind) -> bool {
        match task {
            TaskKind::Swim => self.can_swim,
            TaskKind::Dig => self.can_dig,
            TaskKind::FindTreasure => self.can_find_treasure,
            TaskKind::Carry | TaskKind::Fight => true,
        }
    }

    /// Multiplier applied to every melee hit.
    pub fn attack_multiplier(&self) -> f32 {
        self.strength * self.attack_bonus
    }
}
