//! Spring force: Hooke's law along a link, pulling or pushing each
//! endpoint back toward the configured rest length.

use lin_alg::f64::Vec3;

use crate::body::Body;

/// Below this separation, `Spring` substitutes `rest_length / 2` for the
/// actual distance in its stretch ratio, matching the floor the original
/// tool applies to keep the force finite as two linked nodes coincide.
const MIN_LENGTH: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub stiffness: f64,
    pub rest_length: f64,
}

impl Spring {
    /// The force pulling `from` toward `to`. Per Open Question 1 (see
    /// DESIGN.md), the stiffness term is scaled by `from`'s mass, heavier
    /// nodes resist stretch more than light ones on the same link.
    pub fn apply(&self, from: &Body, to: &Body) -> Vec3 {
        let delta = to.position - from.position;
        let actual_length = delta.magnitude();
        let actual_length = if actual_length < MIN_LENGTH {
            self.rest_length / 2.0
        } else {
            actual_length
        };

        let stretch = actual_length - self.rest_length;
        let c = self.stiffness * stretch / actual_length * from.mass;

        delta * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: &str, x: f64, mass: f64) -> Body {
        Body::new(id, Vec3::new(x, 0.0, 0.0), mass).unwrap()
    }

    #[test]
    fn pulls_stretched_spring_together_scenario_1() {
        let a = body("a", 0.0, 1.0);
        let b = body("b", 100.0, 1.0);
        let spring = Spring {
            stiffness: 1.0,
            rest_length: 30.0,
        };
        let f = spring.apply(&a, &b);
        assert!(f.x > 0.0, "a should be pulled toward b when stretched past rest length");
    }

    #[test]
    fn pushes_compressed_spring_apart() {
        let a = body("a", 0.0, 1.0);
        let b = body("b", 10.0, 1.0);
        let spring = Spring {
            stiffness: 1.0,
            rest_length: 30.0,
        };
        let f = spring.apply(&a, &b);
        assert!(f.x < 0.0, "a should be pushed away from b when compressed below rest length");
    }

    #[test]
    fn at_rest_length_force_is_zero() {
        let a = body("a", 0.0, 1.0);
        let b = body("b", 30.0, 1.0);
        let spring = Spring {
            stiffness: 2.5,
            rest_length: 30.0,
        };
        let f = spring.apply(&a, &b);
        assert!(f.magnitude() < 1e-9);
    }
}
