//! [`Body`]: the physical proxy for a graph node during layout.

use lin_alg::f64::Vec3;

use crate::error::{LayoutError, Result};

/// A position/mass pair, the minimum any force needs to act on something.
///
/// `Body` implements this directly; the octree's internal pseudo-bodies
/// (cell centers of mass) implement it too, so a force's `apply` can be
/// written once and used for both real and aggregated interactions.
pub trait MassPoint {
    fn position(&self) -> Vec3;
    fn mass(&self) -> f64;
}

/// A node's physical proxy: identity, position, mass, velocity, and the
/// force accumulator rules write into each iteration.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub force: Vec3,
    pub mass: f64,
}

impl Body {
    /// Creates a new body at rest. `mass` must be positive.
    pub fn new(id: impl Into<String>, position: Vec3, mass: f64) -> Result<Self> {
        if !(mass > 0.0) {
            return Err(LayoutError::NonPositiveMass(mass));
        }
        Ok(Self {
            id: id.into(),
            position,
            velocity: Vec3::new_zero(),
            force: Vec3::new_zero(),
            mass,
        })
    }

    /// Zeroes the force accumulator ahead of a new iteration.
    pub fn reset_force(&mut self) {
        self.force = Vec3::new_zero();
    }
}

impl MassPoint for Body {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

/// A point mass with no identity of its own: the octree's view of a
/// subtree once it's been collapsed to its center of mass.
#[derive(Debug, Clone, Copy)]
pub struct PseudoBody {
    pub position: Vec3,
    pub mass: f64,
}

impl MassPoint for PseudoBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        assert!(Body::new("a", Vec3::new_zero(), 0.0).is_err());
        assert!(Body::new("a", Vec3::new_zero(), -1.0).is_err());
        assert!(Body::new("a", Vec3::new_zero(), 1.0).is_ok());
    }

    #[test]
    fn starts_at_rest() {
        let b = Body::new("a", Vec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
        assert_eq!(b.velocity.magnitude(), 0.0);
        assert_eq!(b.force.magnitude(), 0.0);
    }
}
