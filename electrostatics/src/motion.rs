//! Charged particle in electric and magnetic fields

use common::vector::{cross, Vector};
use glam::DVec3;

/// |qB| or |B|² below this is treated as no magnetic field
const MAGNETIC_EPSILON: f64 = 1e-10;

/// F = q(E + v × B)
pub fn lorentz_force(charge: f64, electric_field: DVec3, velocity: DVec3, magnetic_field: DVec3) -> DVec3 {
    (electric_field + cross(velocity, magnetic_field)) * charge
}

/// ω = qB/m
pub fn cyclotron_frequency(charge: f64, mass: f64, magnetic_field: f64) -> f64 {
    charge * magnetic_field / mass
}

/// r = mv/(qB); `None` when there is effectively no magnetic field
pub fn cyclotron_radius(mass: f64, speed: f64, charge: f64, magnetic_field: f64) -> Option<f64> {
    let qb = charge * magnetic_field;
    if qb.abs() < MAGNETIC_EPSILON {
        return None;
    }
    Some(mass * speed / qb)
}

/// E × B drift: v = (E × B)/B²
pub fn drift_velocity(electric_field: DVec3, magnetic_field: DVec3) -> DVec3 {
    let b_squared = magnetic_field.dot(magnetic_field);
    if b_squared < MAGNETIC_EPSILON {
        return DVec3::ZERO;
    }
    cross(electric_field, magnetic_field) * (1.0 / b_squared)
}

/// ½mv²
pub fn kinetic_energy(mass: f64, velocity: DVec3) -> f64 {
    0.5 * mass * velocity.magnitude().powi(2)
}

/// Potential that stops the particle: V = ½mv²/q
pub fn stopping_potential(mass: f64, speed: f64, charge: f64) -> f64 {
    0.5 * mass * speed * speed / charge
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lorentz_force_electric_only() {
        let f = lorentz_force(1e-6, DVec3::new(1000.0, 0.0, 0.0), DVec3::ZERO, DVec3::ZERO);
        assert_relative_eq!(f.x, 1e-3, epsilon = 1e-12);
        assert_relative_eq!(f.y, 0.0);
    }

    #[test]
    fn test_lorentz_force_magnetic_only() {
        // (100, 0, 0) × (0, 0, 1) = (0, -100, 0)
        let f = lorentz_force(
            1e-6,
            DVec3::ZERO,
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(f.y, -1e-4, epsilon = 1e-12);
        assert_relative_eq!(f.x, 0.0);
    }

    #[test]
    fn test_cyclotron() {
        assert_relative_eq!(cyclotron_frequency(2.0, 4.0, 3.0), 1.5);
        assert_relative_eq!(cyclotron_radius(2.0, 3.0, 1.0, 2.0).unwrap(), 3.0);
        assert!(cyclotron_radius(1.0, 1.0, 1e-6, 1e-6).is_none());
    }

    #[test]
    fn test_drift_velocity_perpendicular() {
        let e = DVec3::new(0.0, 10.0, 0.0);
        let b = DVec3::new(0.0, 0.0, 2.0);
        let v = drift_velocity(e, b);
        assert_relative_eq!(v.x, 5.0);
        assert_eq!(drift_velocity(e, DVec3::ZERO), DVec3::ZERO);
        // No net force on a particle moving at the drift velocity
        let f = lorentz_force(1.0, e, v, b);
        assert_relative_eq!(f.length(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_and_stopping_potential() {
        let ke = kinetic_energy(2.0, DVec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(ke, 25.0);
        assert_relative_eq!(stopping_potential(2.0, 5.0, 25.0), 1.0);
    }
}
