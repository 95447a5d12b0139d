//! The three force kinds this engine knows about, and the rule each is
//! paired with to decide which bodies it acts on (see [`crate::rules`]).
//!
//! A tagged enum is used in place of a `dyn Force` trait object: the
//! inner loop of an iteration dispatches on this a couple hundred
//! thousand times, and a match on a small enum inlines better than a
//! vtable call through a boxed trait object.

pub mod drag;
pub mod repelling;
pub mod spring;

pub use drag::Drag;
pub use repelling::Repelling;
pub use spring::Spring;

use crate::rules::Rule;

/// One configured force: a kind, paired with the rule that dispatches it.
#[derive(Debug, Clone, Copy)]
pub struct ForceEntry {
    pub kind: Force,
    pub rule: Rule,
}

#[derive(Debug, Clone, Copy)]
pub enum Force {
    Repelling(Repelling),
    Spring(Spring),
    Drag(Drag),
}
