//! Player intents: the commands a presentation layer issues during the
//! player phase.
//!
//! Each intent checks the phase and its own preconditions before touching
//! anything, so a rejected intent leaves the battle exactly as it was.

use super::{ActionError, Battle, Intent, Phase};
use crate::combat::{BattleForecast, BattleResult, HealResult};
use crate::config::GameConfig;
use crate::state::{Position, Restored, Unit, UnitClass, UnitError, UnitId};

const SELECTING: &[Phase] = &[Phase::UnitSelect, Phase::Movement];
const MOVING: &[Phase] = &[Phase::Movement, Phase::CantoMovement];
const ACTING: &[Phase] = &[Phase::Movement, Phase::Action];
const SELECTED: &[Phase] = &[
    Phase::Movement,
    Phase::Action,
    Phase::CantoMovement,
    Phase::ConfirmWait,
];
const PLAYER_PHASE: &[Phase] = &[
    Phase::UnitSelect,
    Phase::Movement,
    Phase::Action,
    Phase::CantoMovement,
    Phase::ConfirmWait,
];

impl Battle {
    /// Selects a unit of the active team, or clears the selection with `None`.
    ///
    /// Returns the phase entered: Movement if the unit can still move,
    /// Action if it can only act.
    pub fn select(&mut self, unit: Option<UnitId>) -> Result<Phase, ActionError> {
        self.require_phase(Intent::Select, SELECTING)?;

        let Some(id) = unit else {
            self.clear_selection();
            return Ok(self.turn.phase);
        };

        let candidate = self.roster.get(id).ok_or(ActionError::UnknownUnit(id))?;
        if candidate.team() != self.turn.active_team {
            return Err(ActionError::NotActiveTeam {
                unit: id,
                team: candidate.team(),
            });
        }
        if !candidate.is_alive() {
            return Err(ActionError::Defeated(id));
        }
        let phase = if candidate.can_move_now() {
            Phase::Movement
        } else if candidate.can_act() {
            Phase::Action
        } else {
            return Err(ActionError::AlreadyActed(id));
        };

        self.turn.selected = Some(id);
        self.turn.move_origin = None;
        self.turn.phase = phase;
        tracing::debug!(unit = %id, %phase, "selected");
        Ok(phase)
    }

    /// Moves the selected unit to `destination`.
    pub fn move_selected(&mut self, destination: Position) -> Result<Phase, ActionError> {
        self.require_phase(Intent::Move, MOVING)?;
        let id = self.selected_id()?;

        let origin = self.relocate(id, destination)?;
        self.turn.move_origin = (self.turn.phase == Phase::Movement).then_some(origin);

        let phase = match self.roster.get(id) {
            Some(unit) if unit.can_act() => Phase::Action,
            Some(unit) if unit.can_move_now() => Phase::CantoMovement,
            _ => Phase::ConfirmWait,
        };
        self.turn.phase = phase;
        Ok(phase)
    }

    /// Puts the selected unit back where it started its move.
    ///
    /// Only possible between moving and acting.
    pub fn undo_move(&mut self) -> Result<Position, ActionError> {
        self.require_phase(Intent::UndoMove, SELECTED)?;
        let id = self.selected_id()?;
        let origin = self.turn.move_origin.ok_or(ActionError::NothingToUndo)?;

        let unit = self.roster.get_mut(id).ok_or(ActionError::UnknownUnit(id))?;
        if !unit.has_moved() || unit.has_acted() {
            return Err(ActionError::NothingToUndo);
        }
        self.board.move_unit(unit, origin)?;
        unit.clear_moved();

        self.turn.move_origin = None;
        self.turn.phase = Phase::Movement;
        tracing::debug!(unit = %id, to = %origin, "move undone");
        self.debug_assert_consistent();
        Ok(origin)
    }

    /// The selected unit attacks `target`.
    pub fn attack(&mut self, target: UnitId) -> Result<BattleResult, ActionError> {
        self.require_phase(Intent::Attack, ACTING)?;
        let id = self.selected_id()?;

        let result = self.perform_attack(id, target)?;
        self.after_action(id);
        Ok(result)
    }

    /// The selected unit heals a wounded ally with its staff.
    pub fn heal(&mut self, target: UnitId) -> Result<HealResult, ActionError> {
        self.require_phase(Intent::Heal, ACTING)?;
        let id = self.selected_id()?;

        let healer = self.roster.get(id).ok_or(ActionError::UnknownUnit(id))?;
        if healer.healing_staff().is_none() {
            return Err(ActionError::NoHealingStaff(id));
        }
        let patient = self
            .roster
            .get(target)
            .ok_or(ActionError::UnknownUnit(target))?;
        if !patient.is_wounded() {
            return Err(ActionError::NotWounded(target));
        }

        let result = self.perform_heal(id, target)?;
        self.after_action(id);
        Ok(result)
    }

    /// The selected unit consumes one use of an item. Costs the action.
    pub fn use_item(&mut self, index: usize) -> Result<Restored, ActionError> {
        self.require_phase(Intent::UseItem, ACTING)?;
        let id = self.selected_id()?;

        let unit = self.acting_unit(id)?;
        let restored = unit.use_item(index)?;
        unit.mark_acted();
        tracing::debug!(unit = %id, hp = restored.hp, mp = restored.mp, "item used");

        self.after_action(id);
        Ok(restored)
    }

    /// The selected unit takes its alternate form. Costs the action.
    pub fn transform(&mut self) -> Result<UnitClass, ActionError> {
        self.require_phase(Intent::Transform, ACTING)?;
        let id = self.selected_id()?;

        let unit = self.acting_unit(id)?;
        let class = unit.transform()?;
        unit.mark_acted();
        tracing::debug!(unit = %id, %class, "transformed");

        self.after_action(id);
        Ok(class)
    }

    /// The selected unit returns to its original form. Costs the action.
    pub fn revert(&mut self) -> Result<UnitClass, ActionError> {
        self.require_phase(Intent::Revert, ACTING)?;
        let id = self.selected_id()?;

        let unit = self.acting_unit(id)?;
        let class = unit.revert_transform()?;
        unit.mark_acted();
        tracing::debug!(unit = %id, %class, "reverted");

        self.after_action(id);
        Ok(class)
    }

    /// Equips one of the selected unit's weapons. Free.
    pub fn equip(&mut self, index: usize) -> Result<(), ActionError> {
        self.require_phase(Intent::Equip, SELECTED)?;
        let id = self.selected_id()?;
        let unit = self.roster.get_mut(id).ok_or(ActionError::UnknownUnit(id))?;
        unit.equip_weapon(index)?;
        Ok(())
    }

    /// Hands weapon `index` from one unit to an adjacent ally. Free, and
    /// either both inventories change or neither does.
    pub fn trade_weapon(
        &mut self,
        from: UnitId,
        to: UnitId,
        index: usize,
    ) -> Result<(), ActionError> {
        self.require_phase(Intent::Trade, PLAYER_PHASE)?;

        let giver = self.roster.get(from).ok_or(ActionError::UnknownUnit(from))?;
        let taker = self.roster.get(to).ok_or(ActionError::UnknownUnit(to))?;
        if giver.team() != self.turn.active_team {
            return Err(ActionError::NotActiveTeam {
                unit: from,
                team: giver.team(),
            });
        }
        if from == to || taker.team() != giver.team() {
            return Err(ActionError::NotAlly(to));
        }
        if !giver.is_alive() || !taker.is_alive() {
            let fallen = if giver.is_alive() { to } else { from };
            return Err(ActionError::Defeated(fallen));
        }
        let distance = giver.position().distance(taker.position());
        if distance != 1 {
            return Err(ActionError::OutOfRange {
                target: to,
                distance,
            });
        }
        if index >= giver.weapons().len() {
            return Err(UnitError::NoSuchWeapon { index }.into());
        }
        if taker.inventory().is_full() {
            return Err(UnitError::InventoryFull {
                capacity: GameConfig::MAX_WEAPONS,
            }
            .into());
        }

        let Some((giver, taker)) = self.roster.pair_mut(from, to) else {
            return Err(ActionError::UnknownUnit(from));
        };
        let weapon = giver.remove_weapon(index)?;
        tracing::debug!(%from, %to, weapon = %weapon.name, "weapon traded");
        taker.add_weapon(weapon)?;
        Ok(())
    }

    /// The selected player unit leaves the map through the escape point it
    /// stands on.
    pub fn escape(&mut self) -> Result<u32, ActionError> {
        self.require_phase(Intent::Escape, SELECTED)?;
        let id = self.selected_id()?;

        let unit = self.roster.get(id).ok_or(ActionError::UnknownUnit(id))?;
        let position = unit.position();
        if !self.chapter.is_escape_point(position) {
            return Err(ActionError::NotAnEscapePoint { position });
        }

        self.remove_from_battle(id);
        self.progress.escaped += 1;
        self.clear_selection();
        tracing::info!(unit = %id, escaped = self.progress.escaped, "unit escaped");

        self.evaluate_game_end();
        Ok(self.progress.escaped)
    }

    /// Ends the selected unit's turn.
    pub fn wait(&mut self) -> Result<(), ActionError> {
        self.require_phase(Intent::Wait, SELECTED)?;
        let id = self.selected_id()?;

        let unit = self.roster.get_mut(id).ok_or(ActionError::UnknownUnit(id))?;
        unit.finish_turn();
        self.clear_selection();
        tracing::debug!(unit = %id, "waiting");

        self.evaluate_game_end();
        Ok(())
    }

    /// Forecast for the selected unit attacking `target`.
    pub fn forecast_selected(&self, target: UnitId) -> Option<BattleForecast> {
        self.forecast(self.turn.selected?, target)
    }

    // ===== helpers =====

    fn require_phase(&self, intent: Intent, allowed: &[Phase]) -> Result<(), ActionError> {
        self.ensure_not_over()?;
        if allowed.contains(&self.turn.phase) {
            Ok(())
        } else {
            Err(ActionError::WrongPhase {
                phase: self.turn.phase,
                intent,
            })
        }
    }

    fn selected_id(&self) -> Result<UnitId, ActionError> {
        self.turn.selected.ok_or(ActionError::NoSelection)
    }

    fn acting_unit(&mut self, id: UnitId) -> Result<&mut Unit, ActionError> {
        let unit = self.roster.get_mut(id).ok_or(ActionError::UnknownUnit(id))?;
        if !unit.can_act() {
            return Err(ActionError::AlreadyActed(id));
        }
        Ok(unit)
    }

    fn clear_selection(&mut self) {
        self.turn.selected = None;
        self.turn.move_origin = None;
        self.turn.phase = Phase::UnitSelect;
    }

    /// Phase after the selected unit spends its action.
    fn after_action(&mut self, id: UnitId) {
        self.turn.move_origin = None;
        self.turn.phase = match self.roster.get(id) {
            Some(unit) if unit.can_move_now() => Phase::CantoMovement,
            Some(_) => Phase::ConfirmWait,
            None => {
                self.turn.selected = None;
                Phase::UnitSelect
            }
        };
        self.evaluate_game_end();
    }
}
