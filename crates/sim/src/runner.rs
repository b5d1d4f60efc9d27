//! Drives a battle to completion with both sides under AI control.

use anyhow::{Context, Result};
use tactics_content::{party_for, party_supports};
use tactics_core::{
    ActionError, AiBehavior, AiOutcome, Battle, Chapter, Env, GameConfig, GameError, Objective,
    Position, Team, UnitId,
};

use crate::report::{PhaseLog, Report};

/// Builds a battle with the standing party deployed at the chapter's slots.
pub fn deploy(chapter: Chapter, config: GameConfig, env: Env) -> Result<Battle> {
    let id = chapter.id;
    let party = party_for(&chapter);
    let supports = party_supports(party.len());

    let mut builder = Battle::builder(chapter).config(config).env(env);
    for spawn in party {
        builder = builder.deploy(spawn);
    }
    for support in supports {
        builder = builder.support(support);
    }
    builder
        .build()
        .with_context(|| format!("Failed to deploy the party into chapter {}", id))
}

pub struct Simulation {
    battle: Battle,
    party_behavior: AiBehavior,
    max_turns: u32,
}

impl Simulation {
    pub fn new(battle: Battle, party_behavior: AiBehavior, max_turns: u32) -> Self {
        Self {
            battle,
            party_behavior,
            max_turns,
        }
    }

    /// Alternates player and enemy phases until the chapter is decided or
    /// `max_turns` turns have been played.
    pub fn run(mut self) -> Result<Report> {
        let mut phases = Vec::new();

        while !self.battle.is_over() && self.battle.turn_count() <= self.max_turns {
            let turn = self.battle.turn_count();

            let (actions, escaped) = self.play_party()?;
            phases.push(PhaseLog {
                turn,
                team: Team::Player,
                actions,
                escaped,
            });
            if self.battle.is_over() {
                break;
            }

            let actions = self.battle.end_turn()?;
            phases.push(PhaseLog {
                turn,
                team: Team::Enemy,
                actions,
                escaped: Vec::new(),
            });
        }

        match self.battle.outcome() {
            Some(outcome) => tracing::info!(
                chapter = self.battle.chapter().id,
                %outcome,
                turns = self.battle.turn_count(),
                "chapter decided"
            ),
            None => tracing::warn!(
                chapter = self.battle.chapter().id,
                max_turns = self.max_turns,
                "turn cap reached"
            ),
        }
        Ok(Report::new(&self.battle, phases))
    }

    /// Plays every ready party unit. On escape maps each unit first makes
    /// for the nearest exit and only falls back to the policy when no step
    /// brings it closer.
    fn play_party(&mut self) -> Result<(Vec<AiOutcome>, Vec<UnitId>)> {
        let running = self.battle.chapter().objective == Objective::Escape;
        let mut actions = Vec::new();
        let mut escaped = Vec::new();

        for id in self.battle.roster().team_ids(Team::Player) {
            if self.battle.is_over() {
                break;
            }
            let ready = self.battle.unit(id).is_some_and(|u| !u.is_done());
            if !ready {
                continue;
            }

            if running {
                match self.make_for_exit(id) {
                    Ok(Retreat::Escaped) => {
                        escaped.push(id);
                        continue;
                    }
                    Ok(Retreat::Closer) => continue,
                    Ok(Retreat::Blocked) => {}
                    Err(error) if error.severity().is_recoverable() => {
                        tracing::debug!(
                            unit = %id,
                            code = error.error_code(),
                            severity = error.severity().as_str(),
                            "retreat rejected; using the policy"
                        );
                    }
                    Err(error) => {
                        return Err(error).with_context(|| format!("{} could not retreat", id));
                    }
                }
            }

            actions.push(self.battle.execute_autopilot(id, self.party_behavior)?);
        }
        Ok((actions, escaped))
    }

    fn make_for_exit(&mut self, id: UnitId) -> Result<Retreat, ActionError> {
        let exits = self.battle.chapter().escape_points.clone();
        let Some(from) = self.battle.unit(id).map(|u| u.position()) else {
            return Ok(Retreat::Blocked);
        };
        let gap = |p: Position| exits.iter().map(|exit| exit.distance(p)).min();

        let step = if exits.contains(&from) {
            None
        } else {
            let best = self
                .battle
                .calculate_possible_moves(id)
                .into_iter()
                .min_by_key(|&p| (gap(p), p));
            match best {
                Some(tile) if gap(tile) < gap(from) => Some(tile),
                _ => return Ok(Retreat::Blocked),
            }
        };

        self.battle.select(Some(id))?;
        if let Some(tile) = step {
            self.battle.move_selected(tile)?;
        }
        if exits.contains(&step.unwrap_or(from)) {
            self.battle.escape()?;
            return Ok(Retreat::Escaped);
        }
        self.battle.wait()?;
        tracing::debug!(unit = %id, to = ?step, "heading for the exit");
        Ok(Retreat::Closer)
    }
}

enum Retreat {
    Escaped,
    /// Moved toward an exit and waited.
    Closer,
    /// No exit on the map, or no reachable tile is closer to one.
    Blocked,
}
