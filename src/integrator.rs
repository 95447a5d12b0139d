//! Semi-implicit Euler integration: reads each body's accumulated force
//! and velocity, writes new velocity and position, and reports an energy
//! proxy the engine uses to detect convergence.

use crate::body::Body;
use crate::error::{LayoutError, Result};

/// Fixed integration step. The original tool hardcodes this rather than
/// exposing it as a tunable; §4.5's stabilization threshold is calibrated
/// against it, so it stays fixed here too.
pub const DT: f64 = 3.0;

/// Velocity magnitude above which `normalize_velocity` rescales to unit
/// length, capping how far a single iteration can move a body.
const VELOCITY_CAP: f64 = 1.0;

/// Advances every body by one step and returns the energy proxy
/// `E = (sum of squared per-axis displacement) / N`, used by the engine
/// to decide whether the layout has stabilized.
pub fn integrate(bodies: &mut [Body], normalize_velocity: bool) -> Result<f64> {
    if bodies.is_empty() {
        return Ok(0.0);
    }

    let mut energy = 0.0;
    for body in bodies.iter_mut() {
        let prev = body.position;

        body.velocity += body.force * (DT / body.mass);

        if normalize_velocity {
            let speed = body.velocity.magnitude();
            if speed > VELOCITY_CAP {
                body.velocity = body.velocity * (1.0 / speed);
            }
        }

        body.position += body.velocity * DT;

        if !body.position.x.is_finite() || !body.position.y.is_finite() || !body.position.z.is_finite() {
            return Err(LayoutError::NonFinite {
                id: body.id.clone(),
                field: "position",
            });
        }
        if !body.velocity.x.is_finite() || !body.velocity.y.is_finite() || !body.velocity.z.is_finite() {
            return Err(LayoutError::NonFinite {
                id: body.id.clone(),
                field: "velocity",
            });
        }

        let delta = body.position - prev;
        energy += delta.x * delta.x + delta.y * delta.y + delta.z * delta.z;
    }

    Ok(energy / bodies.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lin_alg::f64::Vec3;

    #[test]
    fn at_rest_with_no_force_stays_put() {
        let mut bodies = vec![Body::new("a", Vec3::new(1.0, 2.0, 3.0), 1.0).unwrap()];
        let e = integrate(&mut bodies, true).unwrap();
        assert_eq!(e, 0.0);
        assert_eq!(bodies[0].position.x, 1.0);
        assert_eq!(bodies[0].position.y, 2.0);
        assert_eq!(bodies[0].position.z, 3.0);
    }

    #[test]
    fn force_accelerates_and_moves_body() {
        let mut bodies = vec![Body::new("a", Vec3::new_zero(), 2.0).unwrap()];
        bodies[0].force = Vec3::new(4.0, 0.0, 0.0);
        integrate(&mut bodies, false).unwrap();
        // v = dt * f / m = 3 * 4 / 2 = 6; p = dt * v = 18
        assert_eq!(bodies[0].velocity.x, 6.0);
        assert_eq!(bodies[0].position.x, 18.0);
    }

    #[test]
    fn normalization_caps_velocity_to_unit_length() {
        let mut bodies = vec![Body::new("a", Vec3::new_zero(), 1.0).unwrap()];
        bodies[0].force = Vec3::new(100.0, 0.0, 0.0);
        integrate(&mut bodies, true).unwrap();
        assert!((bodies[0].velocity.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_body_set_reports_zero_energy() {
        let mut bodies: Vec<Body> = vec![];
        assert_eq!(integrate(&mut bodies, true).unwrap(), 0.0);
    }
}
