//! Scripted unit policies built from behavior trees.
//!
//! Every unit is bound to one [`AiBehavior`], taken from its spawn data and
//! defaulting to Aggressive. A policy moves and attacks through the same
//! resolution the player intents use, and always leaves the unit finished
//! for the turn, whether or not it found anything to do.
//!
//! - [`AiContext`]: blackboard holding the battle and the selected target
//! - [`nodes`]: conditions and actions the policies are assembled from
//! - [`presets`]: the complete tree for each behavior

pub mod context;
pub mod nodes;
pub mod presets;

pub use context::AiContext;

use behavior_tree::{Behavior, Status};

use crate::combat::BattleResult;
use crate::engine::Battle;
use crate::state::{Position, UnitId};

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
pub enum AiBehavior {
    /// Chase the nearest opponent and attack it.
    #[default]
    Aggressive,
    /// Attack only what is already in range; otherwise seek good terrain.
    Defensive,
    /// Attack only what is already in range; never move.
    Stationary,
    /// Healers approach wounded allies; everyone else plays defensive.
    Support,
}

/// What a unit did during its policy turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiOutcome {
    pub unit: UnitId,
    pub behavior: AiBehavior,
    /// Tiles moved to, in order. At most two (a move and a canto move).
    pub moves: Vec<Position>,
    pub attack: Option<BattleResult>,
}

impl AiOutcome {
    pub fn is_idle(&self) -> bool {
        self.moves.is_empty() && self.attack.is_none()
    }
}

/// Plays one unit's turn under `behavior` and marks it finished.
pub(crate) fn run(battle: &mut Battle, unit: UnitId, behavior: AiBehavior) -> AiOutcome {
    let outcome = {
        let mut ctx = AiContext::new(battle, unit);
        let tree = presets::tree(behavior);
        let status = tree.tick(&mut ctx);
        if status == Status::Failure {
            tracing::debug!(%unit, %behavior, "policy found nothing to do");
        }
        ctx.into_outcome(behavior)
    };

    battle.finish_unit_turn(unit);
    tracing::debug!(
        %unit,
        %behavior,
        moves = outcome.moves.len(),
        attacked = outcome.attack.is_some(),
        "ai turn"
    );
    outcome
}
