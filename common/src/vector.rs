//! Value-semantics vector algebra over glam's f64 vectors
//!
//! Every operation takes its operands by value and returns a new vector, so a
//! position stored into a trajectory can never be changed by a later step.

use glam::{DVec2, DVec3};
use nalgebra::{Matrix3, Rotation3, Vector3};
use std::ops::{Add, Mul, Sub};

/// Vectors shorter than this normalize to zero instead of dividing by ~0.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Shared algebra for 2D and 3D vectors.
pub trait Vector: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> {
    const ZERO: Self;

    fn dot(self, other: Self) -> f64;

    fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector
    fn normalized(self) -> Self {
        let mag = self.magnitude();
        if mag < NORMALIZE_EPSILON || !mag.is_finite() {
            Self::ZERO
        } else {
            self * (1.0 / mag)
        }
    }

    fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    fn lerp_to(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Vector for DVec2 {
    const ZERO: Self = DVec2::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec2::dot(self, other)
    }

    fn magnitude(self) -> f64 {
        self.length()
    }
}

impl Vector for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec3::dot(self, other)
    }

    fn magnitude(self) -> f64 {
        self.length()
    }
}

pub fn add<V: Vector>(a: V, b: V) -> V {
    a + b
}

pub fn subtract<V: Vector>(a: V, b: V) -> V {
    a - b
}

pub fn scale<V: Vector>(v: V, scalar: f64) -> V {
    v * scalar
}

pub fn magnitude<V: Vector>(v: V) -> f64 {
    v.magnitude()
}

pub fn normalize<V: Vector>(v: V) -> V {
    v.normalized()
}

pub fn dot<V: Vector>(a: V, b: V) -> f64 {
    Vector::dot(a, b)
}

pub fn cross(a: DVec3, b: DVec3) -> DVec3 {
    a.cross(b)
}

pub fn distance<V: Vector>(a: V, b: V) -> f64 {
    Vector::distance(a, b)
}

pub fn lerp<V: Vector>(a: V, b: V, t: f64) -> V {
    a.lerp_to(b, t)
}

/// Coordinate axis for elementary rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed rotation matrix about a coordinate axis
pub fn rotation_matrix(axis: Axis, angle: f64) -> Matrix3<f64> {
    let unit = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&unit, angle).into_inner()
}

pub fn rotate(matrix: &Matrix3<f64>, v: DVec3) -> DVec3 {
    let r = matrix * Vector3::new(v.x, v.y, v.z);
    DVec3::new(r.x, r.y, r.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(normalize(DVec3::ZERO), DVec3::ZERO);
        assert_eq!(normalize(DVec2::new(1e-14, 0.0)), DVec2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize(DVec3::new(3.0, 4.0, 12.0));
        assert_relative_eq!(magnitude(n), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 3.0 / 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cross_right_handed() {
        let z = cross(DVec3::X, DVec3::Y);
        assert_eq!(z, DVec3::Z);
        assert_eq!(cross(DVec3::Y, DVec3::X), -DVec3::Z);
    }

    #[test]
    fn test_agrees_with_glam() {
        let a = DVec3::new(1.5, -2.0, 0.25);
        let b = DVec3::new(-3.0, 0.5, 4.0);
        assert_eq!(dot(a, b), a.dot(b));
        assert_eq!(cross(a, b), a.cross(b));
        assert_eq!(magnitude(a), a.length());
        assert_relative_eq!(normalize(a).x, a.normalize().x, epsilon = 1e-15);
        assert_relative_eq!(normalize(a).z, a.normalize().z, epsilon = 1e-15);
        assert_eq!(magnitude(DVec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_distance_and_lerp() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(distance(a, b), 5.0, epsilon = 1e-12);
        assert_eq!(lerp(a, b, 0.5), DVec3::new(2.5, 4.0, 3.0));
        assert_eq!(lerp(DVec2::ZERO, DVec2::new(2.0, 2.0), 0.25), DVec2::new(0.5, 0.5));
    }

    #[test]
    fn test_add_subtract_scale() {
        let a = DVec2::new(1.0, -1.0);
        let b = DVec2::new(0.5, 2.0);
        assert_eq!(add(a, b), DVec2::new(1.5, 1.0));
        assert_eq!(subtract(a, b), DVec2::new(0.5, -3.0));
        assert_eq!(scale(a, -2.0), DVec2::new(-2.0, 2.0));
        assert_relative_eq!(dot(a, b), -1.5);
    }

    #[test]
    fn test_rotation_about_z() {
        let m = rotation_matrix(Axis::Z, FRAC_PI_2);
        let r = rotate(&m, DVec3::X);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(r.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_about_x_and_y() {
        let r = rotate(&rotation_matrix(Axis::X, FRAC_PI_2), DVec3::Y);
        assert_relative_eq!(r.z, 1.0, epsilon = 1e-12);
        let r = rotate(&rotation_matrix(Axis::Y, FRAC_PI_2), DVec3::Z);
        assert_relative_eq!(r.x, 1.0, epsilon = 1e-12);
    }
}
