//! Electric fields and potentials
//!
//! Point-sampled quantities treat test points within [`FIELD_CUTOFF`] of a
//! charge as coincident with it and return zero there, so a sampled grid never
//! contains an infinite arrow. Closed forms that take an explicit distance
//! reject non-positive distances instead.

use common::constants::{COULOMB_K, EPSILON_0};
use common::error::{ensure_finite, ensure_non_zero, ensure_positive, Result};
use common::vector::Vector;
use glam::DVec3;
use std::f64::consts::PI;

/// Test points closer than this (m) to a charge see no field from it.
pub const FIELD_CUTOFF: f64 = 1e-10;

/// A fixed point charge (C) at a position (m)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    pub charge: f64,
    pub position: DVec3,
}

impl PointCharge {
    pub fn new(charge: f64, position: DVec3) -> Self {
        Self { charge, position }
    }

    /// E = kq/r² along (test_point - position)
    pub fn field_at(&self, test_point: DVec3) -> DVec3 {
        self.field_at_with_cutoff(test_point, FIELD_CUTOFF)
    }

    /// Field with a caller-chosen singularity cutoff radius
    pub fn field_at_with_cutoff(&self, test_point: DVec3, cutoff: f64) -> DVec3 {
        let r = test_point - self.position;
        let distance = r.magnitude();
        if distance < cutoff {
            return DVec3::ZERO;
        }

        let magnitude = COULOMB_K * self.charge / (distance * distance);
        r.normalized() * magnitude
    }

    /// V = kq/r, zero inside the cutoff
    pub fn potential_at(&self, test_point: DVec3) -> f64 {
        let distance = test_point.distance(self.position);
        if distance < FIELD_CUTOFF {
            return 0.0;
        }
        COULOMB_K * self.charge / distance
    }
}

pub fn point_charge_field(charge: f64, charge_position: DVec3, test_point: DVec3) -> DVec3 {
    PointCharge::new(charge, charge_position).field_at(test_point)
}

/// Superposition of point-charge fields
pub fn multiple_charges_field(charges: &[PointCharge], test_point: DVec3) -> DVec3 {
    charges
        .iter()
        .fold(DVec3::ZERO, |total, c| total + c.field_at(test_point))
}

/// Superposition of point-charge potentials
pub fn multiple_charges_potential(charges: &[PointCharge], test_point: DVec3) -> f64 {
    charges.iter().map(|c| c.potential_at(test_point)).sum()
}

/// Field between parallel plates: E = V/d
pub fn uniform_field(voltage: f64, separation: f64) -> Result<f64> {
    let d = ensure_positive("plate separation", separation)?;
    Ok(voltage / d)
}

/// Infinite line charge: E = λ/(2πε₀r)
pub fn line_charge(linear_charge_density: f64, distance: f64) -> Result<f64> {
    let r = ensure_positive("distance", distance)?;
    Ok(linear_charge_density / (2.0 * PI * EPSILON_0 * r))
}

/// Infinite plane: E = σ/(2ε₀)
pub fn plane_charge(surface_charge_density: f64) -> f64 {
    surface_charge_density / (2.0 * EPSILON_0)
}

/// Field inside a uniformly charged spherical shell vanishes
pub fn inside_spherical_shell() -> f64 {
    0.0
}

/// Outside a spherical shell: E = kQ/r²
pub fn outside_spherical_shell(total_charge: f64, distance: f64) -> Result<f64> {
    let r = ensure_positive("distance", distance)?;
    Ok(COULOMB_K * total_charge / (r * r))
}

/// Point-charge potential: V = kq/r
pub fn potential(charge: f64, distance: f64) -> Result<f64> {
    let r = ensure_positive("distance", distance)?;
    Ok(COULOMB_K * charge / r)
}

/// Uniform-field potential difference: ΔV = E·d
pub fn potential_difference(field_strength: f64, distance: f64) -> f64 {
    field_strength * distance
}

/// F = qE
pub fn force_on_charge(charge: f64, field: DVec3) -> DVec3 {
    field * charge
}

/// W = q·ΔV
pub fn work(charge: f64, potential_difference: f64) -> f64 {
    charge * potential_difference
}

/// u = ½ε₀E²
pub fn energy_density(field_strength: f64) -> f64 {
    0.5 * EPSILON_0 * field_strength * field_strength
}

/// Parallel-plate capacitance: C = ε₀A/d
pub fn capacitance(area: f64, separation: f64) -> Result<f64> {
    let a = ensure_positive("plate area", area)?;
    let d = ensure_positive("plate separation", separation)?;
    Ok(EPSILON_0 * a / d)
}

/// U = ½CV²
pub fn capacitor_energy(capacitance: f64, voltage: f64) -> f64 {
    0.5 * capacitance * voltage * voltage
}

/// Radius of the spherical equipotential V around a point charge: r = |kq/V|
pub fn equipotential_radius(charge: f64, potential: f64) -> Result<f64> {
    let v = ensure_non_zero("potential", potential)?;
    let q = ensure_finite("charge", charge)?;
    Ok((COULOMB_K * q / v).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_positive_charge_points_away() {
        let e = point_charge_field(1e-9, DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0));
        assert!(e.y > 0.0);
        assert_relative_eq!(e.y, COULOMB_K * 1e-9 / 4.0, max_relative = 1e-12);
        assert_relative_eq!(e.x, 0.0);
    }

    #[test]
    fn test_negative_charge_points_toward() {
        let e = point_charge_field(-1e-9, DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        assert!(e.x < 0.0);
    }

    #[test]
    fn test_cutoff_returns_zero() {
        let q = PointCharge::new(1.0, DVec3::ONE);
        assert_eq!(q.field_at(DVec3::ONE), DVec3::ZERO);
        assert_eq!(q.potential_at(DVec3::ONE + DVec3::splat(1e-12)), 0.0);
        // Custom cutoff
        assert_eq!(
            q.field_at_with_cutoff(DVec3::new(1.0, 1.0, 1.5), 1.0),
            DVec3::ZERO
        );
    }

    #[test]
    fn test_dipole_potential_vanishes_on_midplane() {
        let charges = [
            PointCharge::new(2e-9, DVec3::new(-1.0, 0.0, 0.0)),
            PointCharge::new(-2e-9, DVec3::new(1.0, 0.0, 0.0)),
        ];
        let v = multiple_charges_potential(&charges, DVec3::new(0.0, 3.0, -2.0));
        assert_relative_eq!(v, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closed_forms() {
        assert_relative_eq!(uniform_field(100.0, 0.01).unwrap(), 10_000.0);
        assert!(uniform_field(100.0, 0.0).is_err());
        assert_relative_eq!(
            line_charge(1e-6, 0.5).unwrap(),
            1e-6 / (PI * EPSILON_0),
            max_relative = 1e-12
        );
        assert_relative_eq!(plane_charge(2.0 * EPSILON_0), 1.0);
        assert_eq!(inside_spherical_shell(), 0.0);
        assert_relative_eq!(
            outside_spherical_shell(1e-6, 2.0).unwrap(),
            COULOMB_K * 1e-6 / 4.0
        );
        assert_relative_eq!(potential(1e-9, 1.0).unwrap(), COULOMB_K * 1e-9);
        assert!(potential(1e-9, 0.0).is_err());
        assert_relative_eq!(potential_difference(50.0, 0.2), 10.0);
        assert_relative_eq!(work(2.0, 3.0), 6.0);
        assert_relative_eq!(energy_density(1.0), 0.5 * EPSILON_0);
    }

    #[test]
    fn test_capacitor() {
        let c = capacitance(1.0, 1e-3).unwrap();
        assert_relative_eq!(c, EPSILON_0 * 1000.0);
        assert_relative_eq!(capacitor_energy(c, 10.0), 0.5 * c * 100.0);
        assert!(capacitance(-1.0, 1e-3).is_err());
    }

    #[test]
    fn test_equipotential_radius_matches_potential() {
        let r = equipotential_radius(1e-9, 9.0).unwrap();
        assert_relative_eq!(potential(1e-9, r).unwrap(), 9.0, max_relative = 1e-12);
        assert!(equipotential_radius(1e-9, 0.0).is_err());
    }

    #[test]
    fn test_force_on_charge() {
        let f = force_on_charge(-2.0, DVec3::new(1.0, 0.0, 0.5));
        assert_eq!(f, DVec3::new(-2.0, 0.0, -1.0));
    }
}
