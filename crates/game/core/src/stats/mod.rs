//! Additive stat vectors and level scaling.
//!
//! A unit's current stats are never stored: they are recomputed as
//! `class base + level_bonus(level)`, with support bonuses layered on top at
//! combat time. Only hp/mp are stored, as depletable resources.

pub mod support;

pub use support::{SupportRank, SupportRelationship};

use core::ops::{Add, AddAssign, Sub};

/// Seven-field integer stat vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub hp: i32,
    pub mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub skill: i32,
    pub luck: i32,
}

impl Stats {
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0, 0);

    pub const fn new(
        hp: i32,
        mp: i32,
        attack: i32,
        defense: i32,
        speed: i32,
        skill: i32,
        luck: i32,
    ) -> Self {
        Self {
            hp,
            mp,
            attack,
            defense,
            speed,
            skill,
            luck,
        }
    }

    /// Stats granted on top of class base stats at `level`.
    ///
    /// Level 1 grants nothing. Each level beyond that adds 2 hp and 1 point to
    /// mp, attack, defense, speed and skill; luck grows every other level.
    pub fn level_bonus(level: u32) -> Self {
        let gained = level.saturating_sub(1) as i32;
        Self {
            hp: gained * 2,
            mp: gained,
            attack: gained,
            defense: gained,
            speed: gained,
            skill: gained,
            luck: gained / 2,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            hp: self.hp + rhs.hp,
            mp: self.mp + rhs.mp,
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            speed: self.speed + rhs.speed,
            skill: self.skill + rhs.skill,
            luck: self.luck + rhs.luck,
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = *self + rhs;
    }
}

impl Sub for Stats {
    type Output = Stats;

    fn sub(self, rhs: Stats) -> Stats {
        Stats {
            hp: self.hp - rhs.hp,
            mp: self.mp - rhs.mp,
            attack: self.attack - rhs.attack,
            defense: self.defense - rhs.defense,
            speed: self.speed - rhs.speed,
            skill: self.skill - rhs.skill,
            luck: self.luck - rhs.luck,
        }
    }
}

impl core::iter::Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::ZERO, Add::add)
    }
}
