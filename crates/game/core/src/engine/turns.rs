use super::{ActionError, Battle, Intent, Phase};
use crate::ai::{self, AiBehavior, AiOutcome};
use crate::env::Outcome;
use crate::state::{Position, Team, UnitId};

/// Turn counters and the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Starts at 1; incremented when the enemy phase hands back to the player.
    pub(crate) turn_count: u32,
    pub(crate) active_team: Team,
    pub(crate) phase: Phase,
    pub(crate) selected: Option<UnitId>,
    /// Tile the selected unit left on its last undoable move.
    pub(crate) move_origin: Option<Position>,
    /// Roll counter; advanced once per resolved attack.
    pub(crate) nonce: u64,
    pub(crate) outcome: Option<Outcome>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            turn_count: 1,
            active_team: Team::Player,
            phase: Phase::UnitSelect,
            selected: None,
            move_origin: None,
            nonce: 0,
            outcome: None,
        }
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn active_team(&self) -> Team {
        self.active_team
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn rotation and the enemy-phase driver.
///
/// [`end_turn`](Battle::end_turn) runs a whole enemy phase in one call.
/// Presentation layers that animate enemies one at a time can drive the same
/// steps themselves: [`end_player_phase`](Battle::end_player_phase), then
/// [`execute_enemy_action`](Battle::execute_enemy_action) per pending unit,
/// then [`end_enemy_phase`](Battle::end_enemy_phase).
impl Battle {
    /// Ends the player phase, plays the full enemy phase and hands control
    /// back to the player on the next turn.
    pub fn end_turn(&mut self) -> Result<Vec<AiOutcome>, ActionError> {
        let pending = self.end_player_phase()?;

        let mut outcomes = Vec::with_capacity(pending.len());
        for id in pending {
            if self.is_over() {
                break;
            }
            if let Some(outcome) = self.execute_enemy_action(id)? {
                outcomes.push(outcome);
            }
        }

        if !self.is_over() {
            self.end_enemy_phase()?;
        }
        Ok(outcomes)
    }

    /// Resets the player's units, passes control to the enemy and spawns
    /// this turn's reinforcements. Returns the enemies due to act, in id
    /// order.
    pub fn end_player_phase(&mut self) -> Result<Vec<UnitId>, ActionError> {
        self.ensure_not_over()?;
        if self.turn.active_team != Team::Player {
            return Err(ActionError::WrongPhase {
                phase: self.turn.phase,
                intent: Intent::EndTurn,
            });
        }

        self.reset_team(Team::Player);
        self.turn.selected = None;
        self.turn.move_origin = None;
        self.turn.active_team = Team::Enemy;
        self.turn.phase = Phase::EnemyTurn;
        tracing::info!(turn = self.turn.turn_count, "enemy phase");

        let arrivals: Vec<_> = self
            .chapter
            .reinforcements_for(self.turn.turn_count)
            .cloned()
            .collect();
        for spawn in &arrivals {
            if let Some(id) = self.spawn_or_warn(spawn) {
                tracing::info!(unit = %id, name = %spawn.name, at = %spawn.position, "reinforcement");
            }
        }

        self.evaluate_game_end();
        Ok(self.pending_enemy_actions())
    }

    /// Enemies that have not finished their turn yet.
    pub fn pending_enemy_actions(&self) -> Vec<UnitId> {
        if self.turn.active_team != Team::Enemy || self.is_over() {
            return Vec::new();
        }
        self.roster
            .team(Team::Enemy)
            .filter(|u| !u.is_done())
            .map(|u| u.id())
            .collect()
    }

    /// Runs one enemy's policy. `Ok(None)` if the unit is gone or already done.
    pub fn execute_enemy_action(&mut self, id: UnitId) -> Result<Option<AiOutcome>, ActionError> {
        self.ensure_not_over()?;
        if self.turn.phase != Phase::EnemyTurn {
            return Err(ActionError::WrongPhase {
                phase: self.turn.phase,
                intent: Intent::EndTurn,
            });
        }
        match self.roster.get(id) {
            Some(unit) if unit.team() == Team::Enemy && !unit.is_done() => {}
            Some(unit) if unit.team() != Team::Enemy => {
                return Err(ActionError::NotActiveTeam {
                    unit: id,
                    team: unit.team(),
                });
            }
            _ => return Ok(None),
        }

        let behavior = self.behavior_of(id);
        let outcome = ai::run(self, id, behavior);
        self.evaluate_game_end();
        Ok(Some(outcome))
    }

    /// Resets the enemy's units and starts the next player turn.
    pub fn end_enemy_phase(&mut self) -> Result<(), ActionError> {
        self.ensure_not_over()?;
        if self.turn.active_team != Team::Enemy {
            return Err(ActionError::WrongPhase {
                phase: self.turn.phase,
                intent: Intent::EndTurn,
            });
        }

        self.reset_team(Team::Enemy);
        self.turn.active_team = Team::Player;
        self.turn.turn_count += 1;
        self.turn.phase = Phase::UnitSelect;
        tracing::info!(turn = self.turn.turn_count, "player phase");

        self.evaluate_game_end();
        Ok(())
    }

    /// Lets a policy play one of the active team's units, as the enemy phase
    /// does. Used by headless simulations to drive the player side.
    pub fn execute_autopilot(
        &mut self,
        id: UnitId,
        behavior: AiBehavior,
    ) -> Result<AiOutcome, ActionError> {
        self.ensure_not_over()?;
        let unit = self.roster.get(id).ok_or(ActionError::UnknownUnit(id))?;
        if unit.team() != self.turn.active_team {
            return Err(ActionError::NotActiveTeam {
                unit: id,
                team: unit.team(),
            });
        }
        if unit.is_done() {
            return Err(ActionError::AlreadyActed(id));
        }

        if self.turn.selected.is_some() {
            self.turn.selected = None;
            self.turn.move_origin = None;
            self.turn.phase = Phase::UnitSelect;
        }
        let outcome = ai::run(self, id, behavior);
        self.evaluate_game_end();
        Ok(outcome)
    }

    /// Marks a unit as finished for the turn.
    pub(crate) fn finish_unit_turn(&mut self, id: UnitId) {
        if let Some(unit) = self.roster.get_mut(id) {
            unit.finish_turn();
        }
    }

    fn reset_team(&mut self, team: Team) {
        for unit in self.roster.iter_mut().filter(|u| u.team() == team) {
            unit.reset_turn();
        }
    }

    pub(crate) fn ensure_not_over(&self) -> Result<(), ActionError> {
        if self.is_over() {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }
}
