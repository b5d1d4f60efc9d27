//! Static mission descriptors.

use super::{MapLayout, Objective};
use crate::ai::AiBehavior;
use crate::state::{Position, Team, UnitClass, Weapon};

/// One unit to place on the board, initially or as a reinforcement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSpec {
    pub name: String,
    pub class: UnitClass,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default = "default_team"))]
    pub team: Team,
    /// Overrides the default policy for this unit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<AiBehavior>,
    /// Empty means "issue the class default weapon".
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<Weapon>,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_team() -> Team {
    Team::Enemy
}

impl SpawnSpec {
    /// An enemy spawn with class-default equipment and policy.
    pub fn enemy(name: impl Into<String>, class: UnitClass, level: u32, position: Position) -> Self {
        Self {
            name: name.into(),
            class,
            level,
            position,
            team: Team::Enemy,
            behavior: None,
            weapons: Vec::new(),
        }
    }

    /// A party member to deploy.
    pub fn player(name: impl Into<String>, class: UnitClass, level: u32, position: Position) -> Self {
        Self::enemy(name, class, level, position).with_team(Team::Player)
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    pub fn with_behavior(mut self, behavior: AiBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }
}

/// An enemy scheduled to arrive at the start of the enemy phase of `turn`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reinforcement {
    pub turn: u32,
    pub spawn: SpawnSpec,
}

/// Immutable mission definition. The battle keeps its own progress counters
/// and never writes back here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chapter {
    pub id: u32,
    pub name: String,
    pub map: MapLayout,
    pub objective: Objective,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn_limit: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_escapes: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub throne: Option<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub escape_points: Vec<Position>,
    /// Deployment slots for the player party, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_starts: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<SpawnSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: Option<SpawnSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reinforcements: Vec<Reinforcement>,
}

impl Chapter {
    pub fn new(id: u32, name: impl Into<String>, map: MapLayout, objective: Objective) -> Self {
        Self {
            id,
            name: name.into(),
            map,
            objective,
            turn_limit: None,
            required_escapes: 0,
            throne: None,
            escape_points: Vec::new(),
            player_starts: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            reinforcements: Vec::new(),
        }
    }

    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = Some(limit);
        self
    }

    pub fn with_throne(mut self, throne: Position) -> Self {
        self.throne = Some(throne);
        self
    }

    pub fn with_escape(mut self, points: &[Position], required: u32) -> Self {
        self.escape_points = points.to_vec();
        self.required_escapes = required;
        self
    }

    pub fn with_player_starts(mut self, starts: &[Position]) -> Self {
        self.player_starts = starts.to_vec();
        self
    }

    pub fn with_enemy(mut self, spawn: SpawnSpec) -> Self {
        self.enemies.push(spawn);
        self
    }

    pub fn with_boss(mut self, spawn: SpawnSpec) -> Self {
        self.boss = Some(spawn);
        self
    }

    pub fn with_reinforcement(mut self, turn: u32, spawn: SpawnSpec) -> Self {
        self.reinforcements.push(Reinforcement { turn, spawn });
        self
    }

    pub fn reinforcements_for(&self, turn: u32) -> impl Iterator<Item = &SpawnSpec> {
        self.reinforcements
            .iter()
            .filter(move |r| r.turn == turn)
            .map(|r| &r.spawn)
    }

    pub fn is_escape_point(&self, position: Position) -> bool {
        self.escape_points.contains(&position)
    }
}

/// Source of chapter definitions, indexed from 1.
pub trait ChapterOracle: Send + Sync {
    fn chapter(&self, id: u32) -> Option<Chapter>;

    fn total_chapters(&self) -> u32;
}
