//! Action nodes: pick targets, move and strike.
//!
//! Selection nodes only write the blackboard. Movement and attack nodes go
//! through the battle's own resolution, so an AI turn obeys exactly the rules
//! a player turn does.

use std::cmp::Reverse;

use behavior_tree::{Behavior, Status};

use crate::ai::AiContext;
use crate::state::{Position, Unit};

/// Picks the nearest live hostile unit anywhere on the map.
///
/// Ties go to the lower unit id.
pub struct SelectNearestTarget;

impl Behavior<AiContext<'_>> for SelectNearestTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(unit) = ctx.actor() else {
            return Status::Failure;
        };
        let origin = unit.position();
        let nearest = ctx
            .battle
            .units()
            .filter(|other| other.is_alive() && unit.team().is_hostile_to(other.team()))
            .min_by_key(|other| (origin.distance(other.position()), other.id()))
            .map(Unit::id);

        ctx.target = nearest;
        Status::from_bool(nearest.is_some())
    }
}

/// Picks the nearest hostile unit already within striking range.
pub struct SelectNearestInRange;

impl Behavior<AiContext<'_>> for SelectNearestInRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(origin) = ctx.actor().map(Unit::position) else {
            return Status::Failure;
        };
        let nearest = ctx
            .battle
            .attackable_targets(ctx.unit)
            .into_iter()
            .filter_map(|id| ctx.battle.unit(id))
            .min_by_key(|other| (origin.distance(other.position()), other.id()))
            .map(Unit::id);

        ctx.target = nearest;
        Status::from_bool(nearest.is_some())
    }
}

/// Picks the in-range hostile unit with the lowest current hp, then the
/// nearest.
pub struct SelectWeakestInRange;

impl Behavior<AiContext<'_>> for SelectWeakestInRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(origin) = ctx.actor().map(Unit::position) else {
            return Status::Failure;
        };
        let weakest = ctx
            .battle
            .attackable_targets(ctx.unit)
            .into_iter()
            .filter_map(|id| ctx.battle.unit(id))
            .min_by_key(|other| (other.hp(), origin.distance(other.position()), other.id()))
            .map(Unit::id);

        ctx.target = weakest;
        Status::from_bool(weakest.is_some())
    }
}

/// Strikes the selected target.
pub struct AttackTarget;

impl Behavior<AiContext<'_>> for AttackTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(target) = ctx.target else {
            return Status::Failure;
        };
        match ctx.battle.perform_attack(ctx.unit, target) {
            Ok(result) => {
                tracing::debug!(
                    unit = %ctx.unit,
                    %target,
                    damage = result.damage,
                    defeated = result.target_defeated,
                    "ai attack"
                );
                ctx.record_attack(result);
                Status::Success
            }
            Err(error) => {
                tracing::debug!(unit = %ctx.unit, %target, %error, "ai attack rejected");
                Status::Failure
            }
        }
    }
}

/// Moves toward the selected target.
///
/// Tiles from which the target can be struck win; otherwise the tile closest
/// to the target. Remaining ties go to the lowest position. The unit stays
/// put unless the move gains range or closes distance, and succeeds without
/// moving if the target is already in range.
pub struct MoveTowardTarget;

impl Behavior<AiContext<'_>> for MoveTowardTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let (Some(unit), Some(target)) = (ctx.actor(), ctx.target_unit()) else {
            return Status::Failure;
        };
        let goal = target.position();
        let distances = strike_distances(unit);
        let strikes = move |tile: Position| distances.contains(&tile.distance(goal));
        if strikes(unit.position()) {
            return Status::Success;
        }
        approach(ctx, goal, strikes)
    }
}

/// Moves to the reachable tile with the best terrain defense, if it beats
/// the current one.
pub struct MoveToBestDefense;

impl Behavior<AiContext<'_>> for MoveToBestDefense {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(here) = ctx.actor().map(Unit::position) else {
            return Status::Failure;
        };
        let board = ctx.battle.board();
        let bonus = |tile: Position| board.terrain(tile).map_or(0, |t| t.defense_bonus());

        let current = bonus(here);
        let best = ctx
            .battle
            .calculate_possible_moves(ctx.unit)
            .into_iter()
            .map(|tile| (bonus(tile), tile))
            .max_by_key(|&(score, tile)| (score, Reverse(tile)));

        match best {
            Some((score, tile)) if score > current => relocate(ctx, tile),
            _ => Status::Failure,
        }
    }
}

/// Picks the most wounded ally the unit could reach with its staff this
/// turn. Ties go to the lower unit id.
pub struct SelectMostWoundedAlly;

impl Behavior<AiContext<'_>> for SelectMostWoundedAlly {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some(unit) = ctx.actor() else {
            return Status::Failure;
        };
        let origin = unit.position();
        let reach = unit.movement() + heal_range(unit).1;
        let ally = ctx
            .battle
            .units()
            .filter(|other| {
                other.id() != unit.id()
                    && other.team() == unit.team()
                    && other.is_wounded()
                    && origin.distance(other.position()) <= reach
            })
            .min_by_key(|other| (Reverse(other.max_hp() - other.hp()), other.id()))
            .map(Unit::id);

        ctx.ally = ally;
        Status::from_bool(ally.is_some())
    }
}

/// Moves until the selected ally is within staff range. Succeeds without
/// moving if it already is.
pub struct MoveTowardAlly;

impl Behavior<AiContext<'_>> for MoveTowardAlly {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let (Some(unit), Some(ally)) = (ctx.actor(), ctx.ally_unit()) else {
            return Status::Failure;
        };
        let goal = ally.position();
        let (min, max) = heal_range(unit);
        let covers = move |tile: Position| (min..=max).contains(&tile.distance(goal));
        if covers(unit.position()) {
            return Status::Success;
        }
        approach(ctx, goal, covers)
    }
}

/// Distances the unit can currently strike at.
fn strike_distances(unit: &Unit) -> Vec<u32> {
    let by_weapon = unit.equipped_weapon().map_or(0, |w| w.max_range);
    let by_class = unit.profile().attack_range.map_or(0, |(_, max)| max);
    (1..=by_weapon.max(by_class))
        .filter(|&distance| unit.can_attack_at(distance))
        .collect()
}

/// Staff range, or adjacency for a healer without a usable staff.
fn heal_range(unit: &Unit) -> (u32, u32) {
    unit.healing_staff()
        .map_or((1, 1), |staff| (staff.min_range, staff.max_range))
}

/// Moves to the reachable tile that best approaches `goal`: first tiles where
/// `in_reach` holds, then by distance, then by position.
fn approach(ctx: &mut AiContext, goal: Position, in_reach: impl Fn(Position) -> bool) -> Status {
    let Some(here) = ctx.actor().map(Unit::position) else {
        return Status::Failure;
    };
    let current = here.distance(goal);

    let best = ctx
        .battle
        .calculate_possible_moves(ctx.unit)
        .into_iter()
        .min_by_key(|&tile| (!in_reach(tile), tile.distance(goal), tile));

    match best {
        Some(tile) if in_reach(tile) || tile.distance(goal) < current => relocate(ctx, tile),
        _ => Status::Failure,
    }
}

fn relocate(ctx: &mut AiContext, tile: Position) -> Status {
    match ctx.battle.relocate(ctx.unit, tile) {
        Ok(from) => {
            tracing::debug!(unit = %ctx.unit, %from, to = %tile, "ai move");
            ctx.record_move(tile);
            Status::Success
        }
        Err(error) => {
            tracing::debug!(unit = %ctx.unit, to = %tile, %error, "ai move rejected");
            Status::Failure
        }
    }
}
