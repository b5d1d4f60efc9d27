//! Battlefield grid and tile occupancy.
//!
//! The board stores only unit ids per tile; units live in the roster. Every
//! change of a unit's position goes through [`Board::place_unit`],
//! [`Board::move_unit`] or [`Board::remove_unit`], which update the tile and
//! the unit's `position` together.

use super::{Position, Unit, UnitId};
use crate::env::{MapLayout, Terrain};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    #[error("position {position} is out of bounds")]
    OutOfBounds { position: Position },

    #[error("position {position} is occupied by {occupant}")]
    Occupied { position: Position, occupant: UnitId },

    #[error("{terrain} at {position} cannot hold {unit}")]
    Impassable {
        position: Position,
        terrain: Terrain,
        unit: UnitId,
    },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BoardError::Occupied { .. } => ErrorSeverity::Recoverable,
            BoardError::OutOfBounds { .. } | BoardError::Impassable { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BoardError::OutOfBounds { .. } => "BOARD_OUT_OF_BOUNDS",
            BoardError::Occupied { .. } => "BOARD_OCCUPIED",
            BoardError::Impassable { .. } => "BOARD_IMPASSABLE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    position: Position,
    terrain: Terrain,
    occupant: Option<UnitId>,
}

impl Tile {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Fixed-size grid of tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Board {
    /// An all-plain board.
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile {
                    position: Position::new(x, y),
                    terrain: Terrain::Plain,
                    occupant: None,
                });
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Builds an empty board from a chapter layout. Overrides outside the
    /// layout's bounds are ignored.
    pub fn from_layout(layout: &MapLayout) -> Self {
        let mut board = Self::new(layout.width, layout.height);
        for &(position, terrain) in &layout.terrain {
            board.set_terrain(position, terrain);
        }
        board
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.is_valid_position(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|i| &self.tiles[i])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn terrain(&self, position: Position) -> Option<Terrain> {
        self.tile(position).map(Tile::terrain)
    }

    /// Changes a tile's terrain. Returns false when off-board.
    pub fn set_terrain(&mut self, position: Position, terrain: Terrain) -> bool {
        match self.index(position) {
            Some(i) => {
                self.tiles[i].terrain = terrain;
                true
            }
            None => false,
        }
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.tile(position).and_then(Tile::occupant)
    }

    /// Checks whether `unit` could stand on `position` right now.
    pub fn can_accept(&self, unit: &Unit, position: Position) -> Result<(), BoardError> {
        let tile = self
            .tile(position)
            .ok_or(BoardError::OutOfBounds { position })?;

        if let Some(occupant) = tile.occupant
            && occupant != unit.id()
        {
            return Err(BoardError::Occupied { position, occupant });
        }

        if !tile.terrain.admits(unit.can_fly()) {
            return Err(BoardError::Impassable {
                position,
                terrain: tile.terrain,
                unit: unit.id(),
            });
        }

        Ok(())
    }

    /// Puts a unit that is not yet on the board onto `position`.
    pub fn place_unit(&mut self, unit: &mut Unit, position: Position) -> Result<(), BoardError> {
        self.can_accept(unit, position)?;
        let Some(index) = self.index(position) else {
            return Err(BoardError::OutOfBounds { position });
        };
        self.tiles[index].occupant = Some(unit.id());
        unit.set_position(position);
        Ok(())
    }

    /// Moves a unit already on the board, clearing its previous tile.
    pub fn move_unit(&mut self, unit: &mut Unit, destination: Position) -> Result<(), BoardError> {
        self.can_accept(unit, destination)?;
        let Some(to) = self.index(destination) else {
            return Err(BoardError::OutOfBounds {
                position: destination,
            });
        };

        if let Some(from) = self.index(unit.position())
            && self.tiles[from].occupant == Some(unit.id())
        {
            self.tiles[from].occupant = None;
        }
        self.tiles[to].occupant = Some(unit.id());
        unit.set_position(destination);
        Ok(())
    }

    /// Clears the unit's tile. No-op if the unit is not on the board.
    pub fn remove_unit(&mut self, unit: &Unit) {
        if let Some(index) = self.index(unit.position())
            && self.tiles[index].occupant == Some(unit.id())
        {
            self.tiles[index].occupant = None;
        }
    }
}
