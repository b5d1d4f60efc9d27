//! Support relationships: adjacency-triggered bonuses between paired units.

use super::Stats;
use crate::state::{Position, UnitId};

/// Bond strength between two units.
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
pub enum SupportRank {
    #[default]
    None,
    C,
    B,
    A,
    S,
}

impl SupportRank {
    /// Stats granted to each partner while they stand adjacent.
    pub const fn bonus(self) -> Stats {
        match self {
            SupportRank::None => Stats::ZERO,
            SupportRank::C => Stats::new(0, 0, 1, 0, 0, 1, 0),
            SupportRank::B => Stats::new(0, 0, 2, 1, 0, 2, 1),
            SupportRank::A => Stats::new(0, 0, 3, 2, 1, 3, 2),
            SupportRank::S => Stats::new(0, 0, 4, 3, 2, 4, 3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportRelationship {
    pub first: UnitId,
    pub second: UnitId,
    pub rank: SupportRank,
}

impl SupportRelationship {
    pub fn new(first: UnitId, second: UnitId, rank: SupportRank) -> Self {
        Self {
            first,
            second,
            rank,
        }
    }

    pub fn involves(&self, unit: UnitId) -> bool {
        self.first == unit || self.second == unit
    }

    /// The other half of the pair, if `unit` belongs to it.
    pub fn partner_of(&self, unit: UnitId) -> Option<UnitId> {
        if self.first == unit {
            Some(self.second)
        } else if self.second == unit {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Sums the bonuses `unit` receives from every relationship whose partner
/// stands adjacent.
///
/// `locate` resolves a live partner's position; dead or absent partners
/// resolve to `None` and contribute nothing.
pub fn support_bonus<F>(
    relationships: &[SupportRelationship],
    unit: UnitId,
    position: Position,
    locate: F,
) -> Stats
where
    F: Fn(UnitId) -> Option<Position>,
{
    relationships
        .iter()
        .filter_map(|rel| {
            let partner = rel.partner_of(unit)?;
            let partner_pos = locate(partner)?;
            position.is_adjacent(partner_pos).then(|| rel.rank.bonus())
        })
        .sum()
}
