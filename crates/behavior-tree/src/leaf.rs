//! Closure-backed leaf nodes.
//!
//! Most leaves in a policy are one-off checks or steps; wrapping a closure
//! avoids declaring a struct for each of them.

use crate::{Behavior, Status};

/// Read-only predicate over the context.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

/// Mutating step over the context.
pub struct Action<F> {
    step: F,
}

impl<F> Action<F> {
    pub fn new(step: F) -> Self {
        Self { step }
    }
}

impl<C, F> Behavior<C> for Action<F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (self.step)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_mutates_context() {
        let advance = Action::new(|pos: &mut i32| {
            *pos += 2;
            Status::Success
        });

        let mut pos = 1;
        assert_eq!(advance.tick(&mut pos), Status::Success);
        assert_eq!(pos, 3);
    }

    #[test]
    fn condition_does_not_mutate() {
        let in_range = Condition::new(|distance: &u32| *distance <= 2);

        let mut distance = 2;
        assert!(in_range.tick(&mut distance).is_success());
        distance = 3;
        assert!(in_range.tick(&mut distance).is_failure());
    }
}
