//! Behavior tree primitives for scripted unit policies.
//!
//! Trees here are evaluated once per unit activation: every tick runs to
//! completion and reports [`Status::Success`] or [`Status::Failure`]. There is
//! no `Running` state because a tactics turn never suspends mid-decision.
//!
//! Nodes are boxed as [`Node<'n, C>`], which lets a tree borrow the context
//! type it is evaluated against (for example a context holding `&mut` to the
//! battle it drives).
//!
//! - [`Behavior`]: core trait for all nodes
//! - Composites: [`Sequence`], [`Selector`]
//! - Decorators: [`Inverter`], [`AlwaysSucceed`]
//! - Leaves: [`Condition`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Condition};
pub use status::Status;
