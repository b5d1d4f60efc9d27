mod common;

use std::sync::Arc;

use common::*;
use tactics_core::{
    ActionError, FixedRng, Item, Objective, Outcome, Phase, Position, Restored, SpawnSpec,
    SupportRank, SupportRelationship, Team, Unit, UnitClass, UnitError, UnitId, Weapon,
    WeaponKind,
};

fn silver_sword() -> Weapon {
    Weapon::new("Silver Sword", WeaponKind::Sword, 20, (1, 1), 20)
}

fn mend() -> Weapon {
    Weapon::new("Mend", WeaponKind::Staff, 0, (1, 2), 20).with_healing()
}

#[test]
fn unarmed_knight_strikes_an_archer() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Archer, 1, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Knight, 0, 0)]);
    battle.select(Some(UnitId(1))).unwrap();

    let result = battle.attack(UnitId(2)).unwrap();

    // 12 attack against 8 defense halved
    assert_eq!(result.damage, 8);
    assert!(!result.critical);
    assert!(!result.target_defeated);
    assert_eq!(result.experience_gained, 10);
    assert_eq!(battle.unit(UnitId(2)).unwrap().hp(), 10);
    assert_eq!(battle.unit(UnitId(1)).unwrap().experience(), 10);
    assert_eq!(battle.turn_state().nonce(), 1);

    // no canto: striking from the start tile ends the knight's move too
    assert_eq!(battle.phase(), Phase::ConfirmWait);
    assert!(matches!(
        battle.move_selected(Position::new(0, 1)),
        Err(ActionError::WrongPhase { .. })
    ));
    assert_eq!(battle.unit(UnitId(1)).unwrap().position(), Position::new(0, 0));
}

#[test]
fn forecast_matches_the_resolved_strike() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Archer, 1, 0));
    let mut battle = build(chapter, vec![player(UnitClass::Knight, 0, 0)]);
    battle.select(Some(UnitId(1))).unwrap();

    let forecast = battle.forecast_selected(UnitId(2)).unwrap();
    assert_eq!(forecast.attacker_damage, 8);
    assert_eq!(forecast.target_hp_after, 10);
    assert!(!forecast.target_can_counter);
    assert_eq!(forecast.attacker_hp_after, 22);

    let result = battle.attack(UnitId(2)).unwrap();
    assert_eq!(result.damage, forecast.attacker_damage);
    // previews never advance the roll counter
    assert_eq!(battle.turn_state().nonce(), 1);
}

#[test]
fn a_low_roll_lands_a_critical() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 1, 0));
    let mut battle = builder(chapter)
        .rng(Arc::new(FixedRng(0)))
        .deploy(player(UnitClass::Lord, 0, 0))
        .build()
        .unwrap();
    battle.select(Some(UnitId(1))).unwrap();

    let result = battle.attack(UnitId(2)).unwrap();

    assert!(result.critical);
    assert_eq!(result.damage, (7 - 11 / 2) * 3);
}

#[test]
fn last_use_breaks_the_weapon() {
    let rusty = Weapon::new("Rusty Sword", WeaponKind::Sword, 5, (1, 1), 1);
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 1, 0));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 0, 0).with_weapon(rusty)],
    );
    battle.select(Some(UnitId(1))).unwrap();

    let result = battle.attack(UnitId(2)).unwrap();

    assert_eq!(result.damage, 12 - 11 / 2);
    assert!(result.weapon_broke);
    let lord = battle.unit(UnitId(1)).unwrap();
    assert!(lord.weapons().is_empty());
    assert!(lord.equipped_weapon().is_none());
}

#[test]
fn defeating_the_last_enemy_wins_the_chapter() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Thief, 1, 0));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 0, 0).with_weapon(silver_sword())],
    );
    battle.select(Some(UnitId(1))).unwrap();

    let result = battle.attack(UnitId(2)).unwrap();

    assert!(result.target_defeated);
    assert_eq!(result.experience_gained, 25);
    assert!(battle.unit(UnitId(2)).is_none());
    assert_eq!(battle.unit_at(Position::new(1, 0)), None);
    assert_eq!(battle.outcome(), Some(Outcome::Victory));
    assert_eq!(battle.phase(), Phase::GameOver);
    assert_eq!(battle.selected(), None);

    assert_eq!(battle.select(Some(UnitId(1))), Err(ActionError::GameOver));
    assert_eq!(battle.end_turn(), Err(ActionError::GameOver));
}

#[test]
fn killing_a_veteran_levels_up() {
    let chapter = field(Objective::DefeatAll)
        .with_enemy(SpawnSpec::enemy("Veteran", UnitClass::Thief, 4, Position::new(1, 0)))
        .with_enemy(sentry(UnitClass::Knight, 7, 7));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 0, 0).with_weapon(silver_sword())],
    );
    battle.select(Some(UnitId(1))).unwrap();

    let result = battle.attack(UnitId(2)).unwrap();

    assert!(result.target_defeated);
    assert_eq!(result.experience_gained, 100);
    assert!(result.leveled_up());
    assert_eq!((result.level_before, result.level_after), (1, 2));
    let gains = result.stat_gains.unwrap();
    assert_eq!((gains.hp, gains.attack), (2, 1));

    let lord = battle.unit(UnitId(1)).unwrap();
    assert_eq!(lord.level(), 2);
    assert_eq!(lord.experience(), 0);
    assert_eq!(battle.outcome(), None);
}

#[test]
fn adjacent_support_partners_hit_harder() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 2, 0));
    let mut battle = builder(chapter)
        .deploy(player(UnitClass::Lord, 1, 0))
        .deploy(player(UnitClass::Knight, 1, 1))
        .support(SupportRelationship::new(UnitId(1), UnitId(2), SupportRank::A))
        .build()
        .unwrap();

    assert_eq!(battle.support_bonus(UnitId(1)), SupportRank::A.bonus());
    battle.select(Some(UnitId(1))).unwrap();
    let result = battle.attack(UnitId(3)).unwrap();
    assert_eq!(result.damage, (7 + 3) - 11 / 2);
    battle.wait().unwrap();

    battle.select(Some(UnitId(2))).unwrap();
    battle.move_selected(Position::new(1, 4)).unwrap();
    assert!(battle.support_bonus(UnitId(1)).is_zero());
}

#[test]
fn healer_mends_a_wounded_ally() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Archer, 3, 0));
    let mut battle = build(
        chapter,
        vec![
            player(UnitClass::Healer, 0, 0).with_weapon(mend()),
            player(UnitClass::Knight, 1, 0),
            player(UnitClass::Lord, 0, 1),
        ],
    );

    let outcomes = battle.end_turn().unwrap();
    let volley = outcomes[0].attack.unwrap();
    assert_eq!((volley.target, volley.damage), (UnitId(2), 9 - 11 / 2));
    assert_eq!(battle.unit(UnitId(2)).unwrap().hp(), 18);

    battle.select(Some(UnitId(1))).unwrap();
    assert_eq!(battle.heal(UnitId(3)), Err(ActionError::NotWounded(UnitId(3))));

    let result = battle.heal(UnitId(2)).unwrap();
    assert_eq!(result.amount, 4);
    assert_eq!(result.experience_gained, 12);
    assert!(!result.staff_broke);
    assert_eq!(battle.unit(UnitId(2)).unwrap().hp(), 22);
    assert_eq!(battle.unit(UnitId(1)).unwrap().weapons()[0].uses(), 19);
    assert!(battle.unit(UnitId(1)).unwrap().has_acted());
}

#[test]
fn healing_needs_a_staff() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 7, 7));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 0, 0), player(UnitClass::Knight, 1, 0)],
    );
    battle.select(Some(UnitId(1))).unwrap();

    assert_eq!(
        battle.heal(UnitId(2)),
        Err(ActionError::NoHealingStaff(UnitId(1)))
    );
    assert!(battle.unit(UnitId(1)).unwrap().can_act());
}

#[test]
fn vulnerary_restores_hp_and_spends_a_use() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Archer, 3, 0));
    let mut battle = builder(chapter).build().unwrap();

    let id = battle.allocate_id();
    let mut lord = Unit::new(id, "Lord", UnitClass::Lord, Team::Player, 1);
    lord.add_item(Item::new("Vulnerary", 10, 0, 3)).unwrap();
    battle.insert_unit(lord, Position::new(1, 0)).unwrap();

    battle.end_turn().unwrap();
    assert_eq!(battle.unit(id).unwrap().hp(), 20 - (9 - 5 / 2));

    battle.select(Some(id)).unwrap();
    assert_eq!(
        battle.use_item(4),
        Err(ActionError::Unit(UnitError::NoSuchItem { index: 4 }))
    );
    assert_eq!(battle.use_item(0), Ok(Restored { hp: 7, mp: 0 }));

    let lord = battle.unit(id).unwrap();
    assert_eq!(lord.hp(), 20);
    assert_eq!(lord.items()[0].uses(), 2);
    assert!(lord.has_acted());
    assert_eq!(battle.phase(), Phase::ConfirmWait);
    assert!(matches!(
        battle.use_item(0),
        Err(ActionError::WrongPhase { .. })
    ));
}

#[test]
fn weapons_trade_between_adjacent_allies() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 7, 7));
    let mut battle = build(
        chapter,
        vec![
            player(UnitClass::Lord, 0, 0).with_weapon(iron_sword()),
            player(UnitClass::Knight, 1, 0),
            player(UnitClass::Archer, 3, 0),
        ],
    );

    assert_eq!(
        battle.trade_weapon(UnitId(1), UnitId(3), 0),
        Err(ActionError::OutOfRange {
            target: UnitId(3),
            distance: 3
        })
    );
    assert_eq!(
        battle.trade_weapon(UnitId(1), UnitId(2), 2),
        Err(ActionError::Unit(UnitError::NoSuchWeapon { index: 2 }))
    );
    assert_eq!(
        battle.trade_weapon(UnitId(1), UnitId(4), 0),
        Err(ActionError::NotAlly(UnitId(4)))
    );

    battle.trade_weapon(UnitId(1), UnitId(2), 0).unwrap();
    assert!(battle.unit(UnitId(1)).unwrap().weapons().is_empty());
    let knight = battle.unit(UnitId(2)).unwrap();
    assert_eq!(knight.weapons()[0].name, "Iron Sword");
    assert_eq!(knight.equipped_weapon().map(|w| w.name.as_str()), Some("Iron Sword"));
    // trading spends nothing
    assert!(battle.unit(UnitId(1)).unwrap().can_act());
}

#[test]
fn trading_into_a_full_inventory_changes_nothing() {
    let mut packed = player(UnitClass::Knight, 1, 0);
    for _ in 0..5 {
        packed = packed.with_weapon(iron_sword());
    }
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 7, 7));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Lord, 0, 0).with_weapon(silver_sword()), packed],
    );

    assert_eq!(
        battle.trade_weapon(UnitId(1), UnitId(2), 0),
        Err(ActionError::Unit(UnitError::InventoryFull { capacity: 5 }))
    );
    assert_eq!(battle.unit(UnitId(1)).unwrap().weapons().len(), 1);
    assert_eq!(battle.unit(UnitId(2)).unwrap().weapons().len(), 5);
}

#[test]
fn manakete_transforms_and_reverts() {
    let chapter = field(Objective::DefeatAll).with_enemy(sentry(UnitClass::Knight, 7, 7));
    let mut battle = build(
        chapter,
        vec![player(UnitClass::Manakete, 0, 0), player(UnitClass::Lord, 0, 1)],
    );

    battle.select(Some(UnitId(2))).unwrap();
    assert_eq!(
        battle.transform(),
        Err(ActionError::Unit(UnitError::CannotTransform {
            class: UnitClass::Lord
        }))
    );

    battle.select(Some(UnitId(1))).unwrap();
    assert_eq!(battle.transform(), Ok(UnitClass::Dragon));
    let dragon = battle.unit(UnitId(1)).unwrap();
    assert_eq!(dragon.class(), UnitClass::Dragon);
    assert_eq!(dragon.base_class(), UnitClass::Manakete);
    assert_eq!(dragon.hp(), dragon.max_hp());
    assert!(dragon.can_fly());
    assert!(matches!(battle.revert(), Err(ActionError::WrongPhase { .. })));

    battle.end_turn().unwrap();
    battle.select(Some(UnitId(1))).unwrap();
    assert_eq!(battle.revert(), Ok(UnitClass::Manakete));
    assert_eq!(battle.unit(UnitId(1)).unwrap().class(), UnitClass::Manakete);
}
