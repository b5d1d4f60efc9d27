use std::sync::Arc;

use tactics_content::{ChapterRepository, WeaponCatalog, audit, party_for, party_supports};
use tactics_core::{
    AiBehavior, Battle, ChapterOracle, GameConfig, Objective, Team, UnitClass, UnitId,
};

fn deploy(chapter_id: u32) -> Battle {
    let chapter = ChapterRepository::campaign().chapter(chapter_id).unwrap();
    let party = party_for(&chapter);
    let supports = party_supports(party.len());

    let builder = party.into_iter().fold(
        Battle::builder(chapter)
            .config(GameConfig::with_seed(11))
            .tables(Arc::new(WeaponCatalog::standard())),
        |builder, spawn| builder.deploy(spawn),
    );
    supports
        .into_iter()
        .fold(builder, |builder, support| builder.support(support))
        .build()
        .unwrap()
}

#[test]
fn campaign_chapters_pass_the_audit() {
    for chapter in ChapterRepository::campaign().chapters() {
        let issues = audit(chapter);
        assert!(issues.is_empty(), "chapter {}: {:?}", chapter.id, issues);
    }
}

#[test]
fn campaign_covers_the_objectives() {
    let objectives: Vec<_> = ChapterRepository::campaign()
        .chapters()
        .iter()
        .map(|c| c.objective)
        .collect();
    assert_eq!(
        objectives,
        [
            Objective::DefeatAll,
            Objective::SeizeThrone,
            Objective::Survive,
            Objective::Escape,
            Objective::DefeatBoss,
        ]
    );
}

#[test]
fn every_chapter_deploys_in_full() {
    let repository = ChapterRepository::campaign();
    for chapter in repository.chapters() {
        let battle = deploy(chapter.id);
        let expected =
            chapter.player_starts.len() + chapter.enemies.len() + usize::from(chapter.boss.is_some());
        assert_eq!(battle.units().count(), expected, "chapter {}", chapter.id);
        assert_eq!(battle.progress().boss.is_some(), chapter.boss.is_some());

        for unit in battle.units() {
            assert_eq!(battle.unit_at(unit.position()).map(|u| u.id()), Some(unit.id()));
            let unarmed = matches!(unit.class(), UnitClass::Manakete | UnitClass::Dragon);
            assert_eq!(unit.weapons().is_empty(), unarmed, "{}", unit.name());
        }
    }
}

#[test]
fn bosses_keep_their_signature_weapons() {
    let battle = deploy(2);
    let boss = battle.unit(battle.progress().boss.unwrap()).unwrap();
    assert_eq!(boss.name(), "Commander Voss");
    assert_eq!(boss.equipped_weapon().unwrap().name, "Steel Lance");
    assert_eq!(battle.behavior_of(boss.id()), AiBehavior::Stationary);
}

#[test]
fn party_leads_with_the_lord() {
    let battle = deploy(1);
    let lord = battle.unit(UnitId(1)).unwrap();
    assert_eq!(lord.class(), UnitClass::Lord);
    assert_eq!(lord.team(), Team::Player);
    assert_eq!(lord.equipped_weapon().unwrap().name, "Rapier");
}

#[test]
fn autoplay_keeps_the_board_consistent() {
    for id in 1..=5 {
        let mut battle = deploy(id);

        for _ in 0..6 {
            let ready: Vec<_> = battle
                .roster()
                .team(Team::Player)
                .filter(|u| !u.is_done())
                .map(|u| u.id())
                .collect();
            for unit in ready {
                if battle.is_over() {
                    break;
                }
                if battle.unit(unit).is_some() {
                    battle.execute_autopilot(unit, AiBehavior::Aggressive).unwrap();
                }
            }
            if battle.is_over() {
                break;
            }
            battle.end_turn().unwrap();
            if battle.is_over() {
                break;
            }
        }

        for unit in battle.units() {
            assert!(unit.is_alive());
            assert_eq!(battle.unit_at(unit.position()).map(|u| u.id()), Some(unit.id()));
        }
    }
}
