#![allow(dead_code)]

use std::sync::Arc;

use tactics_core::{
    AiBehavior, Battle, BattleBuilder, Chapter, FixedRng, GameConfig, MapLayout, Objective,
    Position, SpawnSpec, UnitClass, UnitId, Weapon, WeaponKind,
};

/// An 8x8 all-plain chapter.
pub fn field(objective: Objective) -> Chapter {
    Chapter::new(1, "Proving Grounds", MapLayout::new(8, 8), objective)
}

/// A builder with variance off and criticals impossible.
pub fn builder(chapter: Chapter) -> BattleBuilder {
    Battle::builder(chapter)
        .config(GameConfig::deterministic())
        .rng(Arc::new(FixedRng(99)))
}

pub fn build(chapter: Chapter, party: Vec<SpawnSpec>) -> Battle {
    party
        .into_iter()
        .fold(builder(chapter), BattleBuilder::deploy)
        .build()
        .expect("battle should build")
}

pub fn player(class: UnitClass, x: i32, y: i32) -> SpawnSpec {
    SpawnSpec::player(class.to_string(), class, 1, Position::new(x, y))
}

/// An enemy that never leaves its tile.
pub fn sentry(class: UnitClass, x: i32, y: i32) -> SpawnSpec {
    SpawnSpec::enemy(class.to_string(), class, 1, Position::new(x, y))
        .with_behavior(AiBehavior::Stationary)
}

pub fn iron_sword() -> Weapon {
    Weapon::new("Iron Sword", WeaponKind::Sword, 5, (1, 1), 46)
}

pub fn at(battle: &Battle, id: u32) -> Position {
    battle
        .unit(UnitId(id))
        .map(|u| u.position())
        .expect("unit should be on the field")
}
