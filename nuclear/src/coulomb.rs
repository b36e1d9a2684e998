//! Coulomb interaction between point nuclei

use crate::coulomb_strength;
use common::constants::{COULOMB_K, ELEMENTARY_CHARGE, HBAR};
use common::error::{ensure_non_zero, ensure_positive, DomainError, Result};
use glam::DVec3;

/// Separations (m) below this are treated as coincident nuclei.
pub const MIN_SEPARATION: f64 = 1e-15;

fn ensure_separation(name: &'static str, distance: f64) -> Result<f64> {
    if distance.is_finite() && distance >= MIN_SEPARATION {
        Ok(distance)
    } else {
        Err(DomainError::OutOfRange {
            name,
            value: distance,
            min: MIN_SEPARATION,
            max: f64::INFINITY,
        })
    }
}

/// F = k·q1·q2·e²/r², positive when repulsive
pub fn force_magnitude(charge1: f64, charge2: f64, distance: f64) -> Result<f64> {
    let r = ensure_separation("separation", distance)?;
    Ok(coulomb_strength(charge1, charge2) / (r * r))
}

/// Force on particle 1 exerted by particle 2.
///
/// Like charges push particle 1 along `position1 - position2`. Returns zero
/// below [`MIN_SEPARATION`].
pub fn force_vector(charge1: f64, position1: DVec3, charge2: f64, position2: DVec3) -> DVec3 {
    let separation = position1 - position2;
    let distance = separation.length();
    if distance < MIN_SEPARATION {
        return DVec3::ZERO;
    }

    // Nuclear lengths are far below the generic normalization epsilon
    let direction = separation / distance;
    direction * (coulomb_strength(charge1, charge2) / (distance * distance))
}

/// U = k·q1·q2·e²/r (J)
pub fn potential_energy(charge1: f64, charge2: f64, distance: f64) -> Result<f64> {
    let r = ensure_separation("separation", distance)?;
    Ok(coulomb_strength(charge1, charge2) / r)
}

/// Field of a nucleus with charge number Z: E = k·Z·e/r²
pub fn electric_field(charge: f64, distance: f64) -> Result<f64> {
    let r = ensure_separation("distance", distance)?;
    Ok(COULOMB_K * charge * ELEMENTARY_CHARGE / (r * r))
}

/// Potential of a nucleus with charge number Z: V = k·Z·e/r
pub fn potential(charge: f64, distance: f64) -> Result<f64> {
    let r = ensure_separation("distance", distance)?;
    Ok(COULOMB_K * charge * ELEMENTARY_CHARGE / r)
}

/// Work done on a moving charge by the field: W = q·e·(V_f - V_i)
pub fn work(
    moving_charge: f64,
    fixed_charge: f64,
    initial_distance: f64,
    final_distance: f64,
) -> Result<f64> {
    let vi = potential(fixed_charge, initial_distance)?;
    let vf = potential(fixed_charge, final_distance)?;
    Ok(moving_charge * ELEMENTARY_CHARGE * (vf - vi))
}

/// Speed at which kinetic energy equals |U|
pub fn escape_velocity(charge1: f64, charge2: f64, distance: f64, mass: f64) -> Result<f64> {
    let m = ensure_positive("mass", mass)?;
    let u = potential_energy(charge1, charge2, distance)?;
    Ok((2.0 * u.abs() / m).sqrt())
}

/// Circular-orbit speed where the Coulomb force supplies the centripetal force
pub fn orbital_velocity(charge1: f64, charge2: f64, radius: f64, mass: f64) -> Result<f64> {
    let m = ensure_positive("mass", mass)?;
    let f = force_magnitude(charge1, charge2, radius)?;
    Ok((f.abs() * radius / m).sqrt())
}

/// Bohr radius of a hydrogen-like system: a₀ = ħ²/(m·k·Z·e²)
pub fn bohr_radius(mass: f64, charge: f64) -> Result<f64> {
    let m = ensure_positive("mass", mass)?;
    let z = ensure_non_zero("charge", charge)?;
    Ok(HBAR * HBAR / (m * coulomb_strength(z, 1.0)))
}

/// |U| at the given separation
pub fn binding_energy(charge1: f64, charge2: f64, radius: f64) -> Result<f64> {
    Ok(potential_energy(charge1, charge2, radius)?.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use common::constants::ELECTRON_MASS;

    #[test]
    fn test_force_magnitude_sign() {
        let repulsive = force_magnitude(2.0, 79.0, 1e-14).unwrap();
        let attractive = force_magnitude(-1.0, 1.0, 1e-14).unwrap();
        assert!(repulsive > 0.0);
        assert!(attractive < 0.0);
        assert_relative_eq!(
            repulsive,
            coulomb_strength(2.0, 79.0) / 1e-28,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_coincident_nuclei() {
        assert!(force_magnitude(1.0, 1.0, 0.0).is_err());
        assert!(potential_energy(1.0, 1.0, 1e-16).is_err());
        assert_eq!(
            force_vector(1.0, DVec3::ZERO, 1.0, DVec3::splat(1e-17)),
            DVec3::ZERO
        );
    }

    #[test]
    fn test_like_charges_repel() {
        let p1 = DVec3::new(2e-14, 0.0, 0.0);
        let f = force_vector(2.0, p1, 79.0, DVec3::ZERO);
        assert!(f.x > 0.0);
        assert_relative_eq!(f.y, 0.0);
        assert_relative_eq!(
            f.x,
            force_magnitude(2.0, 79.0, 2e-14).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_opposite_charges_attract() {
        let p1 = DVec3::new(0.0, 5e-11, 0.0);
        let f = force_vector(-1.0, p1, 1.0, DVec3::ZERO);
        assert!(f.y < 0.0);
    }

    #[test]
    fn test_newton_third_law() {
        let a = DVec3::new(1e-14, -2e-14, 3e-14);
        let b = DVec3::new(-4e-14, 0.5e-14, 0.0);
        let f_ab = force_vector(2.0, a, 6.0, b);
        let f_ba = force_vector(6.0, b, 2.0, a);
        assert_relative_eq!((f_ab + f_ba).length(), 0.0, epsilon = 1e-9 * f_ab.length());
    }

    #[test]
    fn test_potential_and_work() {
        let v = potential(79.0, 1e-14).unwrap();
        assert_relative_eq!(
            v,
            COULOMB_K * 79.0 * ELEMENTARY_CHARGE / 1e-14,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            electric_field(79.0, 1e-14).unwrap() * 1e-14,
            v,
            max_relative = 1e-12
        );
        // Moving a like charge inward costs energy: the field does negative work
        let w = work(2.0, 79.0, 1e-13, 1e-14).unwrap();
        assert!(w > 0.0);
        let du = potential_energy(2.0, 79.0, 1e-14).unwrap()
            - potential_energy(2.0, 79.0, 1e-13).unwrap();
        assert_relative_eq!(w, du, max_relative = 1e-9);
    }

    #[test]
    fn test_escape_and_orbital_velocity() {
        let r = 5.29e-11;
        let v_orbit = orbital_velocity(-1.0, 1.0, r, ELECTRON_MASS).unwrap();
        let v_escape = escape_velocity(-1.0, 1.0, r, ELECTRON_MASS).unwrap();
        assert_relative_eq!(v_escape, v_orbit * 2.0_f64.sqrt(), max_relative = 1e-12);
        assert!(escape_velocity(1.0, 1.0, r, 0.0).is_err());
    }

    #[test]
    fn test_bohr_radius_hydrogen() {
        let a0 = bohr_radius(ELECTRON_MASS, 1.0).unwrap();
        assert_relative_eq!(a0, 5.29177e-11, max_relative = 1e-3);
        // Scales as 1/Z
        assert_relative_eq!(
            bohr_radius(ELECTRON_MASS, 2.0).unwrap(),
            a0 / 2.0,
            max_relative = 1e-12
        );
        assert!(bohr_radius(ELECTRON_MASS, 0.0).is_err());
    }

    #[test]
    fn test_binding_energy_hydrogen() {
        let a0 = bohr_radius(ELECTRON_MASS, 1.0).unwrap();
        let ev = binding_energy(-1.0, 1.0, a0).unwrap() / ELEMENTARY_CHARGE;
        // Twice the 13.6 eV ionization energy
        assert_relative_eq!(ev, 27.2, max_relative = 1e-2);
    }
}
