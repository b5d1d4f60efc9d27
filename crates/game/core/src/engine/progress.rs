//! Chapter progress counters and game-end evaluation.

use super::{Battle, Phase};
use crate::env::{BattleStatus, Outcome, evaluate};
use crate::state::{Position, Team, UnitId};

/// Transient per-battle counters the objectives read. The chapter itself is
/// never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChapterProgress {
    /// Player units standing on the throne at the last evaluation.
    pub units_on_throne: u32,
    /// Player units that left the map through an escape point.
    pub escaped: u32,
    /// The spawned boss, if the chapter has one and it could be placed.
    pub boss: Option<UnitId>,
}

impl Battle {
    pub fn battle_status(&self) -> BattleStatus {
        let team_on = |position: Option<Position>, team: Team| {
            position
                .and_then(|p| self.unit_at(p))
                .is_some_and(|u| u.is_alive() && u.team() == team)
        };
        let throne = self.chapter.throne;

        BattleStatus {
            turn_count: self.turn.turn_count,
            players_alive: self.roster.alive_count(Team::Player),
            enemies_alive: self.roster.alive_count(Team::Enemy),
            boss_defeated: self
                .progress
                .boss
                .is_some_and(|boss| !self.roster.contains(boss)),
            player_on_throne: team_on(throne, Team::Player),
            enemy_on_throne: team_on(throne, Team::Enemy),
            escaped: self.progress.escaped,
        }
    }

    /// Refreshes the progress counters and settles the outcome if the
    /// objective is won or lost. Once settled, the outcome never changes.
    pub(crate) fn evaluate_game_end(&mut self) -> Option<Outcome> {
        if let Some(outcome) = self.turn.outcome {
            return Some(outcome);
        }

        let status = self.battle_status();
        self.progress.units_on_throne = u32::from(status.player_on_throne);

        let outcome = evaluate(&self.chapter, &status)?;
        self.turn.outcome = Some(outcome);
        self.turn.phase = Phase::GameOver;
        self.turn.selected = None;
        self.turn.move_origin = None;
        tracing::info!(
            chapter = self.chapter.id,
            %outcome,
            turn = status.turn_count,
            players = status.players_alive,
            enemies = status.enemies_alive,
            "battle over"
        );
        Some(outcome)
    }
}
