//! Core behavior trait.

use crate::Status;

/// A behavior tree node evaluated against a context `C`.
///
/// The context acts as the blackboard: conditions read it, actions mutate it.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node once.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node whose concrete type may borrow for `'n`.
///
/// Trees are usually built right before they are ticked, so `'n` is tied to
/// the context lifetime.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
