use std::collections::BTreeMap;

use super::{Team, Unit, UnitId};

/// Arena of every unit currently in the battle, keyed by id.
///
/// Only live units stay in the roster: defeated and escaped units are
/// removed, together with their tile occupancy, by the battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    units: BTreeMap<UnitId, Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Two distinct units at once. `None` if either is missing or `a == b`.
    pub fn pair_mut(&mut self, a: UnitId, b: UnitId) -> Option<(&mut Unit, &mut Unit)> {
        if a == b {
            return None;
        }
        let mut first = None;
        let mut second = None;
        for (id, unit) in self.units.iter_mut() {
            if *id == a {
                first = Some(unit);
            } else if *id == b {
                second = Some(unit);
            }
        }
        Some((first?, second?))
    }

    pub(crate) fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.id(), unit)
    }

    pub(crate) fn remove(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    /// Every unit, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    /// Live units of one team, in id order.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.units
            .values()
            .filter(move |u| u.team() == team && u.is_alive())
    }

    pub fn team_ids(&self, team: Team) -> Vec<UnitId> {
        self.team(team).map(Unit::id).collect()
    }

    pub fn alive_count(&self, team: Team) -> usize {
        self.team(team).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnitClass;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(Unit::new(UnitId(1), "Eirika", UnitClass::Lord, Team::Player, 1));
        roster.insert(Unit::new(UnitId(2), "Grunt", UnitClass::Knight, Team::Enemy, 1));
        roster.insert(Unit::new(UnitId(3), "Seth", UnitClass::Cavalier, Team::Player, 1));
        roster
    }

    #[test]
    fn team_filter_skips_the_dead() {
        let mut roster = roster();
        assert_eq!(roster.team_ids(Team::Player), vec![UnitId(1), UnitId(3)]);

        roster.get_mut(UnitId(3)).unwrap().take_damage(999);
        assert_eq!(roster.alive_count(Team::Player), 1);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn pair_mut_borrows_two_units() {
        let mut roster = roster();
        let (a, b) = roster.pair_mut(UnitId(3), UnitId(1)).unwrap();
        assert_eq!((a.id(), b.id()), (UnitId(3), UnitId(1)));

        assert!(roster.pair_mut(UnitId(1), UnitId(1)).is_none());
        assert!(roster.pair_mut(UnitId(1), UnitId(9)).is_none());
    }
}
