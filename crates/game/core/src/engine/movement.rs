//! Movement reachability and relocation.

use std::collections::{BTreeMap, VecDeque};

use super::{ActionError, Battle};
use crate::env::IMPASSABLE;
use crate::state::{Board, Position, Roster, Unit, UnitId};

/// Every tile `unit` could end its move on, with the cheapest cost to get
/// there.
///
/// Breadth-first over the grid, paying each entered tile's terrain cost
/// (fliers pay 1). Allies can be passed through, anything else blocks.
/// The start tile and occupied tiles are never destinations.
pub fn reachable_tiles(board: &Board, roster: &Roster, unit: &Unit) -> BTreeMap<Position, u32> {
    let start = unit.position();
    let budget = unit.movement();
    let flying = unit.can_fly();

    let mut best: BTreeMap<Position, u32> = BTreeMap::new();
    let mut queue = VecDeque::new();
    best.insert(start, 0);
    queue.push_back((start, 0u32));

    while let Some((position, spent)) = queue.pop_front() {
        for next in position.neighbors() {
            let Some(tile) = board.tile(next) else {
                continue;
            };
            let step = tile.terrain().cost_for(flying);
            if step >= IMPASSABLE {
                continue;
            }
            let cost = spent + step;
            if cost > budget {
                continue;
            }
            if let Some(occupant) = tile.occupant()
                && occupant != unit.id()
                && roster
                    .get(occupant)
                    .is_none_or(|other| other.team() != unit.team())
            {
                continue;
            }
            if best.get(&next).is_some_and(|&known| known <= cost) {
                continue;
            }
            best.insert(next, cost);
            queue.push_back((next, cost));
        }
    }

    best.retain(|&position, _| {
        position != start && board.can_accept(unit, position).is_ok()
    });
    best
}

impl Battle {
    /// Destinations the unit can move to this turn, in position order.
    ///
    /// Empty when the unit is unknown or cannot move now.
    pub fn calculate_possible_moves(&self, id: UnitId) -> Vec<Position> {
        match self.roster.get(id) {
            Some(unit) if unit.can_move_now() => reachable_tiles(&self.board, &self.roster, unit)
                .into_keys()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Moves a unit to a reachable tile and marks it as moved. Returns the
    /// tile it left.
    pub(crate) fn relocate(&mut self, id: UnitId, destination: Position) -> Result<Position, ActionError> {
        let unit = self.roster.get(id).ok_or(ActionError::UnknownUnit(id))?;
        if !unit.can_move_now() {
            return Err(ActionError::CannotMove(id));
        }
        if !reachable_tiles(&self.board, &self.roster, unit).contains_key(&destination) {
            return Err(ActionError::Unreachable { destination });
        }

        let unit = self.roster.get_mut(id).ok_or(ActionError::UnknownUnit(id))?;
        let origin = unit.position();
        self.board.move_unit(unit, destination)?;
        unit.mark_moved();
        tracing::debug!(unit = %id, from = %origin, to = %destination, "moved");

        self.debug_assert_consistent();
        Ok(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapLayout, Terrain};
    use crate::state::{Team, UnitClass};

    fn setup(layout: MapLayout, units: &[(u32, UnitClass, Team, Position)]) -> (Board, Roster) {
        let mut board = Board::from_layout(&layout);
        let mut roster = Roster::new();
        for &(id, class, team, at) in units {
            let mut unit = Unit::new(UnitId(id), "u", class, team, 1);
            board.place_unit(&mut unit, at).unwrap();
            roster.insert(unit);
        }
        (board, roster)
    }

    #[test]
    fn excludes_start_occupied_and_water() {
        let layout = MapLayout::new(7, 7).with_terrain(Position::new(3, 2), Terrain::Water);
        let (board, roster) = setup(
            layout,
            &[
                (1, UnitClass::Lord, Team::Player, Position::new(3, 3)),
                (2, UnitClass::Knight, Team::Player, Position::new(3, 4)),
            ],
        );
        let lord = roster.get(UnitId(1)).unwrap();

        let moves = reachable_tiles(&board, &roster, lord);

        assert!(!moves.contains_key(&Position::new(3, 3)));
        assert!(!moves.contains_key(&Position::new(3, 4)));
        assert!(!moves.contains_key(&Position::new(3, 2)));
        assert!(moves.values().all(|&cost| cost <= lord.movement()));
        // reached around the water
        assert_eq!(moves.get(&Position::new(3, 1)), Some(&4));
    }

    #[test]
    fn allies_can_be_passed_but_enemies_block() {
        // a corridor one tile wide
        let layout = MapLayout::new(5, 3)
            .with_area(Position::new(0, 0), Position::new(4, 0), Terrain::Water)
            .with_area(Position::new(0, 2), Position::new(4, 2), Terrain::Water);
        let (board, roster) = setup(
            layout.clone(),
            &[
                (1, UnitClass::Lord, Team::Player, Position::new(0, 1)),
                (2, UnitClass::Knight, Team::Player, Position::new(1, 1)),
            ],
        );
        let lord = roster.get(UnitId(1)).unwrap();
        let through_ally = reachable_tiles(&board, &roster, lord);
        assert!(through_ally.contains_key(&Position::new(2, 1)));
        assert!(!through_ally.contains_key(&Position::new(1, 1)));

        let (board, roster) = setup(
            layout,
            &[
                (1, UnitClass::Lord, Team::Player, Position::new(0, 1)),
                (2, UnitClass::Knight, Team::Enemy, Position::new(1, 1)),
            ],
        );
        let lord = roster.get(UnitId(1)).unwrap();
        assert!(reachable_tiles(&board, &roster, lord).is_empty());
    }

    #[test]
    fn terrain_cost_limits_range() {
        let layout = MapLayout::new(6, 1).with_area(
            Position::new(1, 0),
            Position::new(5, 0),
            Terrain::Mountain,
        );
        let (board, roster) = setup(
            layout,
            &[(1, UnitClass::Knight, Team::Player, Position::new(0, 0))],
        );
        let knight = roster.get(UnitId(1)).unwrap();

        let moves: Vec<_> = reachable_tiles(&board, &roster, knight).into_keys().collect();
        assert_eq!(moves, vec![Position::new(1, 0)]);
    }

    #[test]
    fn fliers_ignore_terrain() {
        let layout = MapLayout::new(8, 1).with_area(
            Position::new(1, 0),
            Position::new(7, 0),
            Terrain::Water,
        );
        let (board, roster) = setup(
            layout,
            &[(1, UnitClass::PegasusKnight, Team::Player, Position::new(0, 0))],
        );
        let pegasus = roster.get(UnitId(1)).unwrap();

        let moves = reachable_tiles(&board, &roster, pegasus);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves.get(&Position::new(7, 0)), Some(&7));
    }
}
