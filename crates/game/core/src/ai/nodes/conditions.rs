//! Condition nodes: read the battle, never change it.

use behavior_tree::{Behavior, Status};

use crate::ai::AiContext;

/// The unit has not spent its action this turn.
pub struct CanAct;

impl Behavior<AiContext<'_>> for CanAct {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.actor().is_some_and(|u| u.can_act()))
    }
}

/// The unit may still move, including a canto move after acting.
pub struct CanMove;

impl Behavior<AiContext<'_>> for CanMove {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.actor().is_some_and(|u| u.can_move_now()))
    }
}

pub struct HasCanto;

impl Behavior<AiContext<'_>> for HasCanto {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.actor().is_some_and(|u| u.has_canto()))
    }
}

/// The unit's class is a healer.
pub struct IsHealer;

impl Behavior<AiContext<'_>> for IsHealer {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.actor().is_some_and(|u| u.class().is_healer()))
    }
}

/// The selected target can be struck from where the unit stands.
pub struct TargetInRange;

impl Behavior<AiContext<'_>> for TargetInRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let (Some(unit), Some(target)) = (ctx.actor(), ctx.target_unit()) else {
            return Status::Failure;
        };
        Status::from_bool(
            target.is_alive() && unit.can_attack_at(unit.position().distance(target.position())),
        )
    }
}
