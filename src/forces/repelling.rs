//! Repelling force: Coulomb's law between every pair of bodies, applied
//! directly or via a Barnes-Hut pseudo-body (see [`crate::octree`]).

use lin_alg::f64::Vec3;

use crate::body::MassPoint;

/// Distance below which `r` is floored, both here and in the octree's
/// opening-criterion ratio. Prevents blowup as two bodies coincide.
pub const DISTANCE_FLOOR: f64 = 10.0;

/// `coefficient * m1 * m2 / r^3` directed along the separation vector.
/// A negative `coefficient` repels; positive would attract.
#[derive(Debug, Clone, Copy)]
pub struct Repelling {
    pub coefficient: f64,
}

impl Repelling {
    pub fn apply(&self, from: &impl MassPoint, to: &impl MassPoint) -> Vec3 {
        let delta = to.position() - from.position();
        let r = delta.magnitude().max(DISTANCE_FLOOR);
        let v = self.coefficient * from.mass() * to.mass() / (r * r * r);
        delta * v
    }
}
