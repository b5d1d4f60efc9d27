//! Decorators wrapping a single child.

use crate::{Behavior, Node, Status};

/// Logical NOT over its child.
pub struct Inverter<'n, C> {
    child: Node<'n, C>,
}

impl<'n, C> Inverter<'n, C> {
    pub fn new(child: Node<'n, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Ticks its child and reports `Success` whatever the child returned.
///
/// Used for optional trailing steps that must not fail the enclosing
/// sequence, e.g. repositioning after an attack.
pub struct AlwaysSucceed<'n, C> {
    child: Node<'n, C>,
}

impl<'n, C> AlwaysSucceed<'n, C> {
    pub fn new(child: Node<'n, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    struct Wounds(u32);

    #[test]
    fn inverter_flips_condition() {
        let healthy: Inverter<'_, Wounds> =
            Inverter::new(Box::new(Condition::new(|w: &Wounds| w.0 > 0)));

        assert_eq!(healthy.tick(&mut Wounds(0)), Status::Success);
        assert_eq!(healthy.tick(&mut Wounds(3)), Status::Failure);
    }

    #[test]
    fn always_succeed_still_runs_child() {
        struct Bleed;
        impl Behavior<Wounds> for Bleed {
            fn tick(&self, ctx: &mut Wounds) -> Status {
                ctx.0 += 1;
                Status::Failure
            }
        }

        let optional: AlwaysSucceed<'_, Wounds> = AlwaysSucceed::new(Box::new(Bleed));
        let mut wounds = Wounds(0);
        assert_eq!(optional.tick(&mut wounds), Status::Success);
        assert_eq!(wounds.0, 1);
    }
}
