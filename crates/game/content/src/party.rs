//! The standing player party.

use tactics_core::{Chapter, SpawnSpec, SupportRank, SupportRelationship, UnitClass, UnitId};

/// Roster in deployment order. The Lord always deploys first.
const ROSTER: [(&str, UnitClass); 6] = [
    ("Roderic", UnitClass::Lord),
    ("Hale", UnitClass::Knight),
    ("Sera", UnitClass::Cavalier),
    ("Wren", UnitClass::Archer),
    ("Liora", UnitClass::Healer),
    ("Kestrel", UnitClass::PegasusKnight),
];

/// Bonds between roster slots, by deployment order.
const BONDS: [(usize, usize, SupportRank); 3] = [
    (0, 2, SupportRank::B),
    (1, 4, SupportRank::C),
    (3, 5, SupportRank::C),
];

/// Fills the chapter's deployment slots from the roster, in order.
///
/// Units carry no weapons; the battle issues class defaults from its tables.
pub fn party_for(chapter: &Chapter) -> Vec<SpawnSpec> {
    ROSTER
        .iter()
        .zip(&chapter.player_starts)
        .map(|(&(name, class), &position)| SpawnSpec::player(name, class, 1, position))
        .collect()
}

/// Support bonds among the first `deployed` party members.
///
/// Party members receive ids in deployment order starting at 1.
pub fn party_supports(deployed: usize) -> Vec<SupportRelationship> {
    BONDS
        .iter()
        .filter(|(a, b, _)| *a < deployed && *b < deployed)
        .map(|&(a, b, rank)| {
            SupportRelationship::new(UnitId(a as u32 + 1), UnitId(b as u32 + 1), rank)
        })
        .collect()
}
