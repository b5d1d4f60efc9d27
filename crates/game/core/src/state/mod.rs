//! Battlefield state: geometry, units, equipment and the board that holds them.
//!
//! Units live in the [`Roster`] arena; the [`Board`] stores only ids per tile.
//! The battle engine is the only writer of either.
mod board;
mod common;
mod equipment;
mod roster;
mod unit;

pub use board::{Board, BoardError, Tile};
pub use common::{Position, Team, UnitId};
pub use equipment::{Item, TriangleEdge, Weapon, WeaponKind, WeaponRank, WeaponUse};
pub use roster::Roster;
pub use unit::{
    ClassProfile, Inventory, LevelProgress, Restored, TurnFlags, Unit, UnitClass, UnitError,
};
