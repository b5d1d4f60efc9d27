mod common;

use common::*;
use tactics_core::{
    ActionError, AiBehavior, Chapter, MapLayout, Objective, Outcome, Position, SpawnSpec, Team,
    Terrain, UnitClass, UnitId, Weapon, WeaponKind,
};

fn raider(class: UnitClass, x: i32, y: i32) -> SpawnSpec {
    SpawnSpec::enemy(class.to_string(), class, 1, Position::new(x, y))
}

fn silver_lance() -> Weapon {
    Weapon::new("Silver Lance", WeaponKind::Lance, 20, (1, 1), 20)
}

#[test]
fn aggressive_units_close_in_and_strike() {
    let chapter = field(Objective::DefeatAll).with_enemy(raider(UnitClass::Knight, 3, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);
    assert_eq!(battle.behavior_of(UnitId(2)), AiBehavior::Aggressive);

    let outcomes = battle.end_turn().unwrap();

    let knight = &outcomes[0];
    assert_eq!(knight.unit, UnitId(2));
    assert_eq!(knight.moves, vec![Position::new(0, 1)]);
    let strike = knight.attack.unwrap();
    assert_eq!((strike.target, strike.damage), (UnitId(1), 12 - 5 / 2));
    assert_eq!(battle.unit(UnitId(1)).unwrap().hp(), 10);
    assert_eq!(at(&battle, 2), Position::new(0, 1));
}

#[test]
fn aggressive_units_out_of_reach_still_advance() {
    let chapter = field(Objective::DefeatAll).with_enemy(raider(UnitClass::Knight, 7, 7));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    let knight = &outcomes[0];
    assert!(knight.attack.is_none());
    assert_eq!(knight.moves.len(), 1);
    let after = at(&battle, 2);
    assert_eq!(after.distance(Position::new(0, 0)), 14 - 4);
}

#[test]
fn mounted_raiders_use_canto_after_a_kill() {
    let chapter = field(Objective::DefeatAll)
        .with_enemy(raider(UnitClass::Cavalier, 5, 0).with_weapon(silver_lance()));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Thief, 0, 0), player(UnitClass::Lord, 0, 7)],
    );

    let outcomes = battle.end_turn().unwrap();

    let cavalier = &outcomes[0];
    assert!(cavalier.attack.unwrap().target_defeated);
    assert_eq!(
        cavalier.moves,
        vec![Position::new(0, 1), Position::new(0, 6)]
    );
    assert!(battle.unit(UnitId(1)).is_none());
    // the action is spent: the canto move closes on the lord without a second strike
    let lord = battle.unit(UnitId(2)).unwrap();
    assert_eq!(lord.hp(), lord.max_hp());
    assert_eq!(battle.outcome(), None);
}

#[test]
fn canto_is_skipped_while_the_target_stays_in_range() {
    let chapter = field(Objective::DefeatAll).with_enemy(raider(UnitClass::Cavalier, 5, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    assert_eq!(outcomes[0].moves, vec![Position::new(0, 1)]);
    assert!(outcomes[0].attack.is_some());
}

#[test]
fn defensive_units_hit_the_weakest_in_range() {
    let chapter = field(Objective::DefeatAll)
        .with_enemy(raider(UnitClass::Archer, 2, 2).with_behavior(AiBehavior::Defensive));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 2, 0), player(UnitClass::Thief, 0, 2)],
    );

    let outcomes = battle.end_turn().unwrap();

    let strike = outcomes[0].attack.unwrap();
    assert_eq!(strike.target, UnitId(2));
    assert_eq!(strike.damage, 9 - 3 / 2);
    assert!(outcomes[0].moves.is_empty());
}

#[test]
fn defensive_units_fall_back_to_a_fort() {
    let map = MapLayout::new(8, 8)
        .with_terrain(Position::new(6, 7), Terrain::Forest)
        .with_terrain(Position::new(7, 5), Terrain::Fort);
    let chapter = Chapter::new(2, "Hold the Gate", map, Objective::DefeatAll)
        .with_enemy(raider(UnitClass::Archer, 7, 7).with_behavior(AiBehavior::Defensive));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    assert_eq!(outcomes[0].moves, vec![Position::new(7, 5)]);
    assert!(outcomes[0].attack.is_none());
    assert_eq!(battle.board().terrain(at(&battle, 2)), Some(Terrain::Fort));
}

#[test]
fn stationary_units_never_move() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 3, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    assert!(outcomes[0].is_idle());
    assert_eq!(at(&battle, 2), Position::new(3, 0));
}

#[test]
fn support_healers_walk_toward_the_most_wounded_ally() {
    let mend = Weapon::new("Mend", WeaponKind::Staff, 0, (1, 2), 20).with_healing();
    let chapter = field(Objective::DefeatAll)
        .with_enemy(sentry(UnitClass::Knight, 1, 0))
        .with_enemy(
            raider(UnitClass::Healer, 6, 0)
                .with_weapon(mend)
                .with_behavior(AiBehavior::Support),
        );
    let mut battle = build(chapter, vec![player(UnitClass::Knight, 0, 0)]);
    battle.select(Some(UnitId(1))).unwrap();
    battle.attack(UnitId(2)).unwrap();
    battle.wait().unwrap();
    assert!(battle.unit(UnitId(2)).unwrap().is_wounded());

    let outcomes = battle.end_turn().unwrap();

    let healer = outcomes.iter().find(|o| o.unit == UnitId(3)).unwrap();
    assert_eq!(healer.behavior, AiBehavior::Support);
    assert_eq!(healer.moves, vec![Position::new(2, 0)]);
    assert!(healer.attack.is_none());
}

#[test]
fn support_without_a_patient_plays_defensive() {
    let map = MapLayout::new(8, 8).with_terrain(Position::new(5, 5), Terrain::Fort);
    let chapter = Chapter::new(3, "Chapel", map, Objective::DefeatAll)
        .with_enemy(raider(UnitClass::Healer, 6, 6).with_behavior(AiBehavior::Support));
    let mut battle = build(chapter, vec![player(UnitClass::Lord, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    assert_eq!(outcomes[0].moves, vec![Position::new(5, 5)]);
}

#[test]
fn wiping_out_the_party_ends_the_enemy_phase_early() {
    let chapter = field(Objective::DefeatAll)
        .with_enemy(raider(UnitClass::Knight, 3, 0).with_weapon(silver_lance()))
        .with_enemy(raider(UnitClass::Archer, 7, 7));
    let mut battle = build(chapter, vec![player(UnitClass::Thief, 0, 0)]);

    let outcomes = battle.end_turn().unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].attack.unwrap().target_defeated);
    assert_eq!(battle.outcome(), Some(Outcome::Defeat));
    assert_eq!(battle.turn_count(), 1);
    assert_eq!(battle.active_team(), Team::Enemy);
}

#[test]
fn autopilot_plays_a_player_unit() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Archer, 3, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Knight, 0, 0)]);

    assert_eq!(
        battle.execute_autopilot(UnitId(2), AiBehavior::Aggressive),
        Err(ActionError::NotActiveTeam {
            unit: UnitId(2),
            team: Team::Enemy
        })
    );

    let outcome = battle
        .execute_autopilot(UnitId(1), AiBehavior::Aggressive)
        .unwrap();

    assert_eq!(outcome.moves, vec![Position::new(2, 0)]);
    assert_eq!(outcome.attack.unwrap().damage, 12 - 8 / 2);
    assert!(battle.unit(UnitId(1)).unwrap().is_done());
    assert_eq!(
        battle.execute_autopilot(UnitId(1), AiBehavior::Aggressive),
        Err(ActionError::AlreadyActed(UnitId(1)))
    );
}
