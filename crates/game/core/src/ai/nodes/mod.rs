//! Tactics-specific behavior tree nodes.
//!
//! - `conditions`: read-only checks on the acting unit and its target
//! - `actions`: target selection, movement and attacks

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
