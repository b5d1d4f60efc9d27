//! Weapons and consumable items.

use super::UnitClass;

/// Weapon families. Sword, Lance and Axe form the weapon triangle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponKind {
    Sword,
    Lance,
    Axe,
    Bow,
    Tome,
    Staff,
}

/// Outcome of the weapon triangle from the attacker's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriangleEdge {
    Advantage,
    Disadvantage,
    Neutral,
}

impl WeaponKind {
    /// Sword beats Axe, Axe beats Lance, Lance beats Sword.
    pub fn triangle_against(self, other: WeaponKind) -> TriangleEdge {
        use WeaponKind::*;
        match (self, other) {
            (Sword, Axe) | (Axe, Lance) | (Lance, Sword) => TriangleEdge::Advantage,
            (Axe, Sword) | (Lance, Axe) | (Sword, Lance) => TriangleEdge::Disadvantage,
            _ => TriangleEdge::Neutral,
        }
    }

    /// Staves mend; every other family strikes.
    pub fn is_offensive(self) -> bool {
        !matches!(self, WeaponKind::Staff)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponRank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
}

/// Result of spending one use of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponUse {
    Remaining(u32),
    Broken,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: WeaponRank,
    pub might: i32,
    pub hit: i32,
    pub critical: i32,
    pub weight: i32,
    pub min_range: u32,
    pub max_range: u32,
    pub max_uses: u32,
    uses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heals: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effective_against: Vec<UnitClass>,
}

impl Weapon {
    /// A fresh weapon at full durability with no special properties.
    pub fn new(
        name: impl Into<String>,
        kind: WeaponKind,
        might: i32,
        range: (u32, u32),
        max_uses: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            rank: WeaponRank::E,
            might,
            hit: 80,
            critical: 0,
            weight: 5,
            min_range: range.0,
            max_range: range.1,
            max_uses,
            uses: max_uses,
            heals: false,
            effective_against: Vec::new(),
        }
    }

    pub fn with_rank(mut self, rank: WeaponRank) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_accuracy(mut self, hit: i32, critical: i32, weight: i32) -> Self {
        self.hit = hit;
        self.critical = critical;
        self.weight = weight;
        self
    }

    pub fn with_healing(mut self) -> Self {
        self.heals = true;
        self
    }

    pub fn effective_against(mut self, classes: &[UnitClass]) -> Self {
        self.effective_against = classes.to_vec();
        self
    }

    /// Overrides remaining uses, clamped to `max_uses`.
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = uses.min(self.max_uses);
        self
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn is_broken(&self) -> bool {
        self.uses == 0
    }

    /// Spends one use.
    pub fn use_once(&mut self) -> WeaponUse {
        self.uses = self.uses.saturating_sub(1);
        if self.uses == 0 {
            WeaponUse::Broken
        } else {
            WeaponUse::Remaining(self.uses)
        }
    }

    pub fn in_range(&self, distance: u32) -> bool {
        (self.min_range..=self.max_range).contains(&distance)
    }

    pub fn is_effective_against(&self, class: UnitClass) -> bool {
        self.effective_against.contains(&class)
    }

    pub fn can_heal(&self) -> bool {
        self.heals && !self.is_broken()
    }

    pub fn can_strike(&self) -> bool {
        self.kind.is_offensive() && !self.is_broken()
    }
}

/// Consumable restoring hp and/or mp.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub heal: i32,
    pub mana: i32,
    pub max_uses: u32,
    uses: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, heal: i32, mana: i32, max_uses: u32) -> Self {
        Self {
            name: name.into(),
            heal,
            mana,
            max_uses,
            uses: max_uses,
        }
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses == 0
    }

    /// Spends one use; returns false if nothing was left.
    pub fn consume(&mut self) -> bool {
        if self.uses == 0 {
            return false;
        }
        self.uses -= 1;
        true
    }
}
