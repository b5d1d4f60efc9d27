use crate::state::Position;

/// Movement cost that ground units can never pay.
pub const IMPASSABLE: u32 = 999;

/// Canonical terrain classes for battlefield tiles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    #[default]
    Plain,
    Forest,
    Mountain,
    /// Impassable to anything that cannot fly.
    Water,
    Fort,
    Village,
}

impl Terrain {
    /// Cost for a ground unit to enter this tile.
    pub const fn movement_cost(self) -> u32 {
        match self {
            Terrain::Plain | Terrain::Village => 1,
            Terrain::Forest | Terrain::Fort => 2,
            Terrain::Mountain => 3,
            Terrain::Water => IMPASSABLE,
        }
    }

    /// Cost for a unit to enter this tile; fliers pay 1 everywhere.
    pub const fn cost_for(self, flying: bool) -> u32 {
        if flying { 1 } else { self.movement_cost() }
    }

    /// Added to the effective defense of a unit standing here.
    pub const fn defense_bonus(self) -> i32 {
        match self {
            Terrain::Plain | Terrain::Water => 0,
            Terrain::Forest | Terrain::Village => 1,
            Terrain::Mountain | Terrain::Fort => 2,
        }
    }

    /// Reserved for hit-rate modeling; not consumed by damage resolution.
    pub const fn avoid_bonus(self) -> i32 {
        match self {
            Terrain::Plain | Terrain::Water => 0,
            Terrain::Village => 10,
            Terrain::Forest | Terrain::Fort => 20,
            Terrain::Mountain => 30,
        }
    }

    pub const fn admits(self, flying: bool) -> bool {
        flying || !matches!(self, Terrain::Water)
    }
}

/// Static layout of a chapter's battlefield.
///
/// Every tile not listed in `terrain` is [`Terrain::Plain`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub terrain: Vec<(Position, Terrain)>,
}

impl MapLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            terrain: Vec::new(),
        }
    }

    pub fn with_terrain(mut self, position: Position, terrain: Terrain) -> Self {
        self.terrain.push((position, terrain));
        self
    }

    /// Fills the inclusive rectangle `from..=to` with `terrain`.
    pub fn with_area(mut self, from: Position, to: Position, terrain: Terrain) -> Self {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.terrain.push((Position::new(x, y), terrain));
            }
        }
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_water_blocks_ground_units() {
        for terrain in Terrain::iter() {
            assert_eq!(terrain.admits(false), terrain != Terrain::Water);
            assert!(terrain.admits(true));
        }
        assert_eq!(Terrain::Water.movement_cost(), IMPASSABLE);
        assert_eq!(Terrain::Water.cost_for(true), 1);
    }

    #[test]
    fn plain_grants_no_bonus() {
        assert_eq!(Terrain::Plain.defense_bonus(), 0);
        assert_eq!(Terrain::Plain.avoid_bonus(), 0);
        assert_eq!(Terrain::Plain.movement_cost(), 1);
        assert!(Terrain::Fort.defense_bonus() > Terrain::Forest.defense_bonus());
    }

    #[test]
    fn area_fill_covers_rectangle() {
        let layout = MapLayout::new(5, 5).with_area(
            Position::new(3, 1),
            Position::new(1, 2),
            Terrain::Forest,
        );
        assert_eq!(layout.terrain.len(), 6);
        assert!(layout.contains(Position::new(4, 4)));
        assert!(!layout.contains(Position::new(5, 0)));
        assert!(!layout.contains(Position::new(-1, 0)));
    }
}
