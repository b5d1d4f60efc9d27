//! Shorthands for assembling trees without `Box::new(...)` noise.

use crate::{Action, AlwaysSucceed, Behavior, Condition, Inverter, Node, Selector, Sequence, Status};

#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn inverter<'n, C: 'n>(child: Node<'n, C>) -> Node<'n, C> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed<'n, C: 'n>(child: Node<'n, C>) -> Node<'n, C> {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn condition<'n, C: 'n, F>(predicate: F) -> Node<'n, C>
where
    F: Fn(&C) -> bool + Send + Sync + 'n,
{
    Box::new(Condition::new(predicate))
}

#[inline]
pub fn action<'n, C: 'n, F>(step: F) -> Node<'n, C>
where
    F: Fn(&mut C) -> Status + Send + Sync + 'n,
{
    Box::new(Action::new(step))
}

/// Boxes an existing node value.
#[inline]
pub fn node<'n, C, B>(behavior: B) -> Node<'n, C>
where
    B: Behavior<C> + 'n,
{
    Box::new(behavior)
}
