//! Victory and defeat predicates.
//!
//! Missing chapter data (a Survive objective without a turn limit, an escape
//! map that requires no escapes, a seize map without a throne) makes the
//! objective unreachable rather than an error.

use super::Chapter;

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
pub enum Objective {
    #[default]
    DefeatAll,
    DefeatBoss,
    SeizeThrone,
    /// Hold out until the turn limit.
    Survive,
    /// Move `required_escapes` units off the map through escape points.
    Escape,
    /// Keep enemies off the throne until the turn limit.
    Defend,
}

/// What the objective predicates need to know about a battle in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleStatus {
    pub turn_count: u32,
    pub players_alive: usize,
    pub enemies_alive: usize,
    /// The chapter's boss was spawned and has since been defeated.
    pub boss_defeated: bool,
    pub player_on_throne: bool,
    pub enemy_on_throne: bool,
    pub escaped: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

pub fn is_objective_complete(chapter: &Chapter, status: &BattleStatus) -> bool {
    let limit_reached = chapter
        .turn_limit
        .is_some_and(|limit| status.turn_count >= limit);

    match chapter.objective {
        Objective::DefeatAll => status.enemies_alive == 0,
        Objective::DefeatBoss => status.boss_defeated,
        Objective::SeizeThrone => chapter.throne.is_some() && status.player_on_throne,
        Objective::Survive | Objective::Defend => limit_reached && status.players_alive > 0,
        Objective::Escape => {
            chapter.required_escapes > 0 && status.escaped >= chapter.required_escapes
        }
    }
}

pub fn is_objective_failed(chapter: &Chapter, status: &BattleStatus) -> bool {
    if status.players_alive == 0 {
        // an empty field after the last required unit escaped is a win
        return !(chapter.objective == Objective::Escape && is_objective_complete(chapter, status));
    }
    match chapter.objective {
        Objective::Defend => status.enemy_on_throne,
        Objective::Survive => false,
        _ => chapter
            .turn_limit
            .is_some_and(|limit| status.turn_count > limit),
    }
}

/// Defeat is checked first: losing the last unit on the final turn of a
/// Survive map is still a loss.
pub fn evaluate(chapter: &Chapter, status: &BattleStatus) -> Option<Outcome> {
    if is_objective_failed(chapter, status) {
        Some(Outcome::Defeat)
    } else if is_objective_complete(chapter, status) {
        Some(Outcome::Victory)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapLayout;
    use crate::state::Position;

    fn chapter(objective: Objective) -> Chapter {
        Chapter::new(1, "Test", MapLayout::new(10, 10), objective)
    }

    fn status(turn_count: u32) -> BattleStatus {
        BattleStatus {
            turn_count,
            players_alive: 2,
            enemies_alive: 3,
            ..BattleStatus::default()
        }
    }

    #[test]
    fn survive_completes_at_turn_limit() {
        let survive = chapter(Objective::Survive).with_turn_limit(10);

        assert!(!is_objective_complete(&survive, &status(9)));
        assert!(is_objective_complete(&survive, &status(10)));
        assert_eq!(evaluate(&survive, &status(11)), Some(Outcome::Victory));
    }

    #[test]
    fn survive_requires_a_living_player() {
        let survive = chapter(Objective::Survive).with_turn_limit(10);
        let wiped = BattleStatus {
            players_alive: 0,
            ..status(10)
        };
        assert!(!is_objective_complete(&survive, &wiped));
        assert_eq!(evaluate(&survive, &wiped), Some(Outcome::Defeat));
    }

    #[test]
    fn survive_without_limit_never_completes() {
        let survive = chapter(Objective::Survive);
        assert!(!is_objective_complete(&survive, &status(500)));
        assert!(!is_objective_failed(&survive, &status(500)));
    }

    #[test]
    fn turn_limit_fails_other_objectives() {
        let rout = chapter(Objective::DefeatAll).with_turn_limit(5);
        assert_eq!(evaluate(&rout, &status(5)), None);
        assert_eq!(evaluate(&rout, &status(6)), Some(Outcome::Defeat));
    }

    #[test]
    fn defend_lost_when_enemy_takes_throne() {
        let defend = chapter(Objective::Defend)
            .with_turn_limit(8)
            .with_throne(Position::new(5, 5));
        let breached = BattleStatus {
            enemy_on_throne: true,
            ..status(3)
        };
        assert_eq!(evaluate(&defend, &breached), Some(Outcome::Defeat));
        assert_eq!(evaluate(&defend, &status(8)), Some(Outcome::Victory));
    }

    #[test]
    fn seize_and_escape() {
        let seize = chapter(Objective::SeizeThrone).with_throne(Position::new(0, 0));
        let seized = BattleStatus {
            player_on_throne: true,
            ..status(2)
        };
        assert!(is_objective_complete(&seize, &seized));
        assert!(!is_objective_complete(&chapter(Objective::SeizeThrone), &seized));

        let escape = chapter(Objective::Escape).with_escape(&[Position::new(9, 0)], 2);
        let one_out = BattleStatus {
            escaped: 1,
            ..status(4)
        };
        assert!(!is_objective_complete(&escape, &one_out));
        assert!(is_objective_complete(
            &escape,
            &BattleStatus {
                escaped: 2,
                ..one_out
            }
        ));
    }

    #[test]
    fn escaping_the_last_units_is_not_a_wipe() {
        let escape = chapter(Objective::Escape).with_escape(&[Position::new(9, 0)], 2);
        let all_out = BattleStatus {
            players_alive: 0,
            escaped: 2,
            ..status(4)
        };
        assert!(!is_objective_failed(&escape, &all_out));
        assert_eq!(evaluate(&escape, &all_out), Some(Outcome::Victory));

        let short = BattleStatus {
            escaped: 1,
            ..all_out
        };
        assert_eq!(evaluate(&escape, &short), Some(Outcome::Defeat));
    }

    #[test]
    fn rout_and_boss() {
        let cleared = BattleStatus {
            enemies_alive: 0,
            ..status(4)
        };
        assert!(is_objective_complete(&chapter(Objective::DefeatAll), &cleared));

        let boss = chapter(Objective::DefeatBoss);
        assert!(!is_objective_complete(&boss, &cleared));
        assert!(is_objective_complete(
            &boss,
            &BattleStatus {
                boss_defeated: true,
                ..status(4)
            }
        ));
    }
}
