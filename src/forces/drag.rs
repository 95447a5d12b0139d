//! Drag force: linear velocity damping, applied per-node rather than
//! per-link or per-pair.

use lin_alg::f64::Vec3;

use crate::body::Body;

#[derive(Debug, Clone, Copy)]
pub struct Drag {
    pub coefficient: f64,
}

impl Drag {
    pub fn apply(&self, body: &Body) -> Vec3 {
        body.velocity * -self.coefficient
    }
}
