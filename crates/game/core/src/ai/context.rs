//! Blackboard shared by the nodes of one policy evaluation.

use super::{AiBehavior, AiOutcome};
use crate::combat::BattleResult;
use crate::engine::Battle;
use crate::state::{Position, Unit, UnitId};

/// Mutable view of the battle for a single unit's turn.
///
/// Selection nodes write `target`/`ally`; movement and attack nodes read
/// them and record what they did.
pub struct AiContext<'a> {
    pub battle: &'a mut Battle,
    pub unit: UnitId,
    pub target: Option<UnitId>,
    pub ally: Option<UnitId>,
    moves: Vec<Position>,
    attack: Option<BattleResult>,
}

impl<'a> AiContext<'a> {
    pub fn new(battle: &'a mut Battle, unit: UnitId) -> Self {
        Self {
            battle,
            unit,
            target: None,
            ally: None,
            moves: Vec::new(),
            attack: None,
        }
    }

    /// The acting unit, if it is still on the battlefield.
    pub fn actor(&self) -> Option<&Unit> {
        self.battle.unit(self.unit)
    }

    pub fn target_unit(&self) -> Option<&Unit> {
        self.target.and_then(|id| self.battle.unit(id))
    }

    pub fn ally_unit(&self) -> Option<&Unit> {
        self.ally.and_then(|id| self.battle.unit(id))
    }

    pub(crate) fn record_move(&mut self, to: Position) {
        self.moves.push(to);
    }

    pub(crate) fn record_attack(&mut self, result: BattleResult) {
        self.attack = Some(result);
    }

    pub fn moves(&self) -> &[Position] {
        &self.moves
    }

    pub fn attack(&self) -> Option<&BattleResult> {
        self.attack.as_ref()
    }

    pub(crate) fn into_outcome(self, behavior: AiBehavior) -> AiOutcome {
        AiOutcome {
            unit: self.unit,
            behavior,
            moves: self.moves,
            attack: self.attack,
        }
    }
}
