//! Complete policy trees, one per [`AiBehavior`].
//!
//! ```text
//! aggressive
//!   └─ Sequence
//!       ├─ SelectNearestTarget
//!       ├─ Selector
//!       │   ├─ attack from here
//!       │   ├─ move into range, then attack
//!       │   └─ close the distance
//!       └─ canto: re-target and reposition
//!
//! defensive   attack the weakest in range, else take the best defensive tile
//! stationary  attack the nearest in range, never move
//! support     healers approach the most wounded ally, others play defensive
//! ```

use behavior_tree::Node;
use behavior_tree::builder::{always_succeed, node, selector, sequence};

use super::AiBehavior;
use super::context::AiContext;
use super::nodes::*;

/// A policy tree evaluated against one unit's context.
pub type PolicyTree<'a> = Node<'a, AiContext<'a>>;

pub fn tree<'a>(behavior: AiBehavior) -> PolicyTree<'a> {
    match behavior {
        AiBehavior::Aggressive => aggressive(),
        AiBehavior::Defensive => defensive(),
        AiBehavior::Stationary => stationary(),
        AiBehavior::Support => support(),
    }
}

pub fn aggressive<'a>() -> PolicyTree<'a> {
    sequence(vec![
        node(SelectNearestTarget),
        selector(vec![
            sequence(vec![node(CanAct), node(TargetInRange), node(AttackTarget)]),
            sequence(vec![
                node(CanAct),
                node(CanMove),
                node(MoveTowardTarget),
                node(TargetInRange),
                node(AttackTarget),
            ]),
            sequence(vec![node(CanMove), node(MoveTowardTarget)]),
        ]),
        always_succeed(sequence(vec![
            node(HasCanto),
            node(CanMove),
            node(SelectNearestTarget),
            node(MoveTowardTarget),
        ])),
    ])
}

pub fn defensive<'a>() -> PolicyTree<'a> {
    selector(vec![
        sequence(vec![
            node(CanAct),
            node(SelectWeakestInRange),
            node(AttackTarget),
        ]),
        sequence(vec![node(CanMove), node(MoveToBestDefense)]),
    ])
}

pub fn stationary<'a>() -> PolicyTree<'a> {
    sequence(vec![
        node(CanAct),
        node(SelectNearestInRange),
        node(AttackTarget),
    ])
}

pub fn support<'a>() -> PolicyTree<'a> {
    // TODO: heal the ally once it is in staff range (Battle::perform_heal);
    // the policy only closes distance for now.
    selector(vec![
        sequence(vec![
            node(IsHealer),
            node(SelectMostWoundedAlly),
            always_succeed(node(MoveTowardAlly)),
        ]),
        defensive(),
    ])
}
