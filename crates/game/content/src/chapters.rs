//! The built-in campaign.

use tactics_core::{
    AiBehavior, Chapter, ChapterOracle, MapLayout, Objective, Position, SpawnSpec, Terrain,
    UnitClass, Weapon, WeaponKind, WeaponRank,
};

/// Chapters indexed by id. Ids start at 1; unknown ids yield `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterRepository {
    chapters: Vec<Chapter>,
}

impl ChapterRepository {
    /// The five-chapter campaign.
    pub fn campaign() -> Self {
        Self::from_chapters(vec![
            border_skirmish(),
            castle_approach(),
            hold_the_line(),
            flight_from_ravenmoor(),
            dragons_lair(),
        ])
    }

    /// Wraps loaded chapters, ordered by id. A repeated id keeps the first
    /// chapter that claimed it.
    pub fn from_chapters(mut chapters: Vec<Chapter>) -> Self {
        chapters.sort_by_key(|c| c.id);
        chapters.dedup_by_key(|c| c.id);
        Self { chapters }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.chapters.iter().map(|c| c.id)
    }
}

impl Default for ChapterRepository {
    fn default() -> Self {
        Self::campaign()
    }
}

impl ChapterOracle for ChapterRepository {
    fn chapter(&self, id: u32) -> Option<Chapter> {
        self.chapters
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|index| self.chapters[index].clone())
    }

    fn total_chapters(&self) -> u32 {
        self.chapters.len() as u32
    }
}

fn at(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn foe(name: &str, class: UnitClass, level: u32, x: i32, y: i32) -> SpawnSpec {
    SpawnSpec::enemy(name, class, level, at(x, y))
}

fn border_skirmish() -> Chapter {
    let map = MapLayout::new(10, 8)
        .with_area(at(4, 2), at(5, 3), Terrain::Forest)
        .with_terrain(at(8, 0), Terrain::Mountain)
        .with_terrain(at(1, 6), Terrain::Village);

    Chapter::new(1, "Border Skirmish", map, Objective::DefeatAll)
        .with_player_starts(&[at(0, 3), at(0, 4), at(1, 3), at(1, 4)])
        .with_enemy(foe("Brigand", UnitClass::Thief, 1, 7, 1))
        .with_enemy(foe("Brigand", UnitClass::Thief, 1, 8, 7))
        .with_enemy(foe("Raider", UnitClass::Knight, 2, 7, 4))
        .with_enemy(
            foe("Lookout", UnitClass::Archer, 1, 9, 5).with_behavior(AiBehavior::Defensive),
        )
}

fn castle_approach() -> Chapter {
    // a river splits the field; the bridge is rows 4 and 5
    let map = MapLayout::new(12, 10)
        .with_area(at(5, 0), at(5, 3), Terrain::Water)
        .with_area(at(5, 6), at(5, 9), Terrain::Water)
        .with_terrain(at(8, 2), Terrain::Forest)
        .with_terrain(at(8, 8), Terrain::Forest)
        .with_terrain(at(10, 5), Terrain::Fort);

    let commander = foe("Commander Voss", UnitClass::Knight, 5, 10, 5)
        .with_behavior(AiBehavior::Stationary)
        .with_weapon(
            Weapon::new("Steel Lance", WeaponKind::Lance, 10, (1, 1), 30)
                .with_rank(WeaponRank::D)
                .with_accuracy(70, 0, 13),
        );

    Chapter::new(2, "Castle Approach", map, Objective::SeizeThrone)
        .with_turn_limit(20)
        .with_throne(at(10, 5))
        .with_player_starts(&[at(0, 4), at(0, 5), at(1, 4), at(1, 5), at(0, 6)])
        .with_enemy(
            foe("Bridge Guard", UnitClass::Knight, 2, 6, 4).with_behavior(AiBehavior::Stationary),
        )
        .with_enemy(
            foe("Bridge Guard", UnitClass::Knight, 2, 6, 5).with_behavior(AiBehavior::Stationary),
        )
        .with_enemy(
            foe("Archer", UnitClass::Archer, 2, 8, 3).with_behavior(AiBehavior::Defensive),
        )
        .with_enemy(foe("Mage", UnitClass::Mage, 2, 9, 7))
        .with_enemy(foe("Sky Scout", UnitClass::PegasusKnight, 1, 11, 0))
        .with_boss(commander)
}

fn hold_the_line() -> Chapter {
    let map = MapLayout::new(10, 10)
        .with_area(at(6, 4), at(7, 5), Terrain::Mountain)
        .with_terrain(at(2, 4), Terrain::Fort)
        .with_terrain(at(2, 5), Terrain::Fort)
        .with_terrain(at(4, 2), Terrain::Forest)
        .with_terrain(at(4, 7), Terrain::Forest);

    Chapter::new(3, "Hold the Line", map, Objective::Survive)
        .with_turn_limit(8)
        .with_player_starts(&[at(2, 4), at(2, 5), at(1, 4), at(1, 5), at(0, 4)])
        .with_enemy(foe("Soldier", UnitClass::Knight, 2, 8, 1))
        .with_enemy(foe("Cutpurse", UnitClass::Thief, 2, 9, 5))
        .with_enemy(
            foe("Archer", UnitClass::Archer, 2, 8, 8).with_behavior(AiBehavior::Defensive),
        )
        .with_reinforcement(2, foe("Lancer", UnitClass::Cavalier, 2, 9, 0))
        .with_reinforcement(3, foe("Lancer", UnitClass::Cavalier, 2, 9, 9))
        .with_reinforcement(4, foe("Wyvern", UnitClass::WyvernRider, 3, 9, 4))
        .with_reinforcement(
            5,
            foe("Archer", UnitClass::Archer, 3, 9, 5).with_behavior(AiBehavior::Defensive),
        )
}

fn flight_from_ravenmoor() -> Chapter {
    let map = MapLayout::new(12, 8)
        .with_area(at(5, 2), at(6, 5), Terrain::Water)
        .with_terrain(at(3, 0), Terrain::Forest)
        .with_terrain(at(8, 6), Terrain::Forest)
        .with_terrain(at(10, 4), Terrain::Fort);

    Chapter::new(4, "Flight from Ravenmoor", map, Objective::Escape)
        .with_turn_limit(15)
        .with_escape(&[at(11, 0), at(11, 7)], 3)
        .with_player_starts(&[at(0, 3), at(0, 4), at(1, 3), at(1, 4), at(0, 2)])
        .with_enemy(foe("Outrider", UnitClass::Cavalier, 3, 9, 1))
        .with_enemy(
            foe("Gatekeeper", UnitClass::Knight, 3, 10, 4).with_behavior(AiBehavior::Stationary),
        )
        .with_enemy(
            foe("Archer", UnitClass::Archer, 3, 9, 6).with_behavior(AiBehavior::Defensive),
        )
        .with_enemy(foe("Wyvern", UnitClass::WyvernRider, 3, 7, 0))
        .with_enemy(foe("Mage", UnitClass::Mage, 3, 10, 3))
}

fn dragons_lair() -> Chapter {
    let map = MapLayout::new(12, 12)
        .with_area(at(6, 6), at(7, 7), Terrain::Water)
        .with_terrain(at(8, 10), Terrain::Mountain)
        .with_terrain(at(10, 8), Terrain::Mountain)
        .with_terrain(at(10, 10), Terrain::Fort)
        .with_area(at(3, 8), at(4, 9), Terrain::Forest);

    Chapter::new(5, "Dragon's Lair", map, Objective::DefeatBoss)
        .with_player_starts(&[at(1, 1), at(1, 2), at(2, 1), at(2, 2), at(0, 1)])
        .with_enemy(foe("Whelp", UnitClass::Manakete, 4, 8, 8))
        .with_enemy(foe("Wyvern", UnitClass::WyvernRider, 4, 5, 10))
        .with_enemy(foe("Wyvern", UnitClass::WyvernRider, 4, 9, 5))
        .with_enemy(foe("Shaman", UnitClass::Mage, 4, 7, 10))
        .with_enemy(
            foe("Acolyte", UnitClass::Healer, 3, 11, 9).with_behavior(AiBehavior::Support),
        )
        .with_enemy(
            foe("Warden", UnitClass::Knight, 4, 9, 11).with_behavior(AiBehavior::Stationary),
        )
        .with_boss(
            foe("Ashgrave", UnitClass::Dragon, 8, 10, 10).with_behavior(AiBehavior::Stationary),
        )
        .with_reinforcement(3, foe("Wyvern", UnitClass::WyvernRider, 4, 11, 0))
        .with_reinforcement(3, foe("Sky Knight", UnitClass::PegasusKnight, 4, 0, 11))
}
