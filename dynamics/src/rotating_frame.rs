//! Fictitious forces in a rotating reference frame
//!
//! Latitudes are in degrees. Earth's rotation vector uses x towards local
//! north along the ground and y along the local vertical.

use common::constants::EARTH_ANGULAR_VELOCITY;
use glam::DVec3;
use std::f64::consts::TAU;

/// Precession rates below this (rad/s) are treated as no precession
const PRECESSION_EPSILON: f64 = 1e-10;

/// F = -2m(ω × v)
pub fn coriolis_force(mass: f64, velocity: DVec3, angular_velocity: DVec3) -> DVec3 {
    angular_velocity.cross(velocity) * (-2.0 * mass)
}

/// F = -m·ω × (ω × r), directed away from the rotation axis
pub fn centrifugal_force(mass: f64, position: DVec3, angular_velocity: DVec3) -> DVec3 {
    angular_velocity.cross(angular_velocity.cross(position)) * -mass
}

/// F = -m(α × r), only present while the rotation rate changes
pub fn euler_force(mass: f64, position: DVec3, angular_acceleration: DVec3) -> DVec3 {
    angular_acceleration.cross(position) * -mass
}

pub fn total_fictitious_force(
    mass: f64,
    position: DVec3,
    velocity: DVec3,
    angular_velocity: DVec3,
    angular_acceleration: DVec3,
) -> DVec3 {
    coriolis_force(mass, velocity, angular_velocity)
        + centrifugal_force(mass, position, angular_velocity)
        + euler_force(mass, position, angular_acceleration)
}

/// Earth's rotation vector seen from the ground at `latitude`
pub fn earth_angular_velocity(latitude: f64) -> DVec3 {
    let lat = latitude.to_radians();
    DVec3::new(lat.cos(), lat.sin(), 0.0) * EARTH_ANGULAR_VELOCITY
}

/// f = 2Ω·sin(latitude)
pub fn coriolis_parameter(latitude: f64) -> f64 {
    2.0 * foucault_precession_rate(latitude)
}

/// Ω·sin(latitude); positive (clockwise seen from above) in the north
pub fn foucault_precession_rate(latitude: f64) -> f64 {
    EARTH_ANGULAR_VELOCITY * latitude.to_radians().sin()
}

/// Time for the swing plane to turn once; `None` on the equator
pub fn foucault_period(latitude: f64) -> Option<f64> {
    let rate = foucault_precession_rate(latitude).abs();
    if rate < PRECESSION_EPSILON {
        return None;
    }
    Some(TAU / rate)
}

/// v_rot = v_inertial - ω × r
pub fn velocity_to_rotating_frame(
    velocity: DVec3,
    position: DVec3,
    angular_velocity: DVec3,
) -> DVec3 {
    velocity - angular_velocity.cross(position)
}

/// v_inertial = v_rot + ω × r
pub fn velocity_to_inertial_frame(
    velocity: DVec3,
    position: DVec3,
    angular_velocity: DVec3,
) -> DVec3 {
    velocity + angular_velocity.cross(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIDEREAL_DAY: f64 = TAU / EARTH_ANGULAR_VELOCITY;

    #[test]
    fn test_centrifugal_points_outward() {
        let w = 2.0;
        let f = centrifugal_force(3.0, DVec3::X, DVec3::Z * w);
        assert_relative_eq!(f.x, 3.0 * w * w);
        assert_relative_eq!(f.y, 0.0);
        // Nothing on the axis itself
        assert_eq!(centrifugal_force(3.0, DVec3::Z * 5.0, DVec3::Z * w), DVec3::ZERO);
    }

    #[test]
    fn test_coriolis_deflects_right_in_counter_clockwise_frame() {
        let f = coriolis_force(1.0, DVec3::X, DVec3::Z);
        assert_eq!(f, DVec3::new(0.0, -2.0, 0.0));
        // No force along the rotation axis
        assert_eq!(coriolis_force(1.0, DVec3::Z, DVec3::Z), DVec3::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let (r, v) = (DVec3::new(1.0, 2.0, 0.5), DVec3::new(-0.3, 0.1, 2.0));
        let (w, a) = (DVec3::new(0.1, 0.0, 1.0), DVec3::new(0.0, 0.2, 0.0));
        let total = total_fictitious_force(2.0, r, v, w, a);
        let parts =
            coriolis_force(2.0, v, w) + centrifugal_force(2.0, r, w) + euler_force(2.0, r, a);
        assert_relative_eq!((total - parts).length(), 0.0, epsilon = 1e-12);
        assert_eq!(euler_force(2.0, r, DVec3::ZERO), DVec3::ZERO);
    }

    #[test]
    fn test_foucault_period() {
        assert_relative_eq!(foucault_period(90.0).unwrap(), SIDEREAL_DAY, max_relative = 1e-12);
        let mid = foucault_period(30.0).unwrap();
        assert_relative_eq!(mid, 2.0 * SIDEREAL_DAY, max_relative = 1e-9);
        assert_relative_eq!(foucault_period(-30.0).unwrap(), mid);
        assert!(foucault_precession_rate(-30.0) < 0.0);
        assert!(foucault_period(0.0).is_none());
        assert_relative_eq!(coriolis_parameter(90.0), 2.0 * EARTH_ANGULAR_VELOCITY);
    }

    #[test]
    fn test_earth_rotation_vector() {
        let pole = earth_angular_velocity(90.0);
        assert_relative_eq!(pole.y, EARTH_ANGULAR_VELOCITY);
        assert_relative_eq!(pole.x, 0.0, epsilon = 1e-20);
        assert_relative_eq!(earth_angular_velocity(45.0).length(), EARTH_ANGULAR_VELOCITY);
    }

    #[test]
    fn test_frame_velocities_round_trip() {
        let (v, r, w) = (DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0), DVec3::Z);
        let rotating = velocity_to_rotating_frame(v, r, w);
        // ω × r = (-2, 0, 0)
        assert_eq!(rotating, DVec3::new(3.0, 0.0, 0.0));
        assert_eq!(velocity_to_inertial_frame(rotating, r, w), v);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_vec3() -> impl Strategy<Value = DVec3> {
        (-10.0..10.0_f64, -10.0..10.0_f64, -10.0..10.0_f64)
            .prop_map(|(x, y, z)| DVec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn coriolis_does_no_work(v in arb_vec3(), w in arb_vec3(), mass in 0.1..10.0_f64) {
            let f = coriolis_force(mass, v, w);
            let scale = mass * w.length() * v.length_squared() + 1.0;
            prop_assert!(f.dot(v).abs() / scale < 1e-12);
        }

        #[test]
        fn centrifugal_is_perpendicular_to_axis(r in arb_vec3(), w in arb_vec3()) {
            let f = centrifugal_force(1.0, r, w);
            let scale = w.length().powi(3) * r.length() + 1.0;
            prop_assert!(f.dot(w).abs() / scale < 1e-12);
        }
    }
}
