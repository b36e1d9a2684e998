//! Closed-form behaviour of a free Gaussian wave packet
//!
//! SI units throughout: widths in metres, masses in kilograms, wave numbers
//! in radians per metre.

use common::constants::{HBAR, PLANCK};
use common::error::{ensure_positive, DomainError, Result};

/// Relative tolerance for [`is_minimum_uncertainty`]
pub const MINIMUM_UNCERTAINTY_TOLERANCE: f64 = 0.01;

/// σ(t) = σ0·√(1 + (ħt / 2mσ0²)²)
pub fn width(initial_width: f64, mass: f64, time: f64) -> Result<f64> {
    let rate = spreading_rate(initial_width, mass)?;
    Ok(initial_width * (1.0 + (rate * time).powi(2)).sqrt())
}

/// x(t) = x0 + v·t
pub fn center_position(initial_position: f64, velocity: f64, time: f64) -> f64 {
    initial_position + velocity * time
}

/// ħ / 2mσ0², the inverse time scale of spreading
pub fn spreading_rate(initial_width: f64, mass: f64) -> Result<f64> {
    let sigma = ensure_positive("initial width", initial_width)?;
    let mass = ensure_positive("mass", mass)?;
    Ok(HBAR / (2.0 * mass * sigma * sigma))
}

/// ħk / m
pub fn group_velocity(wave_number: f64, mass: f64) -> Result<f64> {
    Ok(HBAR * wave_number / ensure_positive("mass", mass)?)
}

/// ħk / 2m, half the group velocity for a free particle
pub fn phase_velocity(wave_number: f64, mass: f64) -> Result<f64> {
    Ok(HBAR * wave_number / (2.0 * ensure_positive("mass", mass)?))
}

/// ħ/2
pub fn minimum_uncertainty_product() -> f64 {
    HBAR / 2.0
}

/// Whether Δx·Δp is within 1% of ħ/2
pub fn is_minimum_uncertainty(position_uncertainty: f64, momentum_uncertainty: f64) -> bool {
    let minimum = minimum_uncertainty_product();
    let product = position_uncertainty * momentum_uncertainty;
    ((product - minimum) / minimum).abs() < MINIMUM_UNCERTAINTY_TOLERANCE
}

/// Δp = ħ / 2σ for a minimum-uncertainty packet of width σ
pub fn momentum_uncertainty(width: f64) -> Result<f64> {
    Ok(HBAR / (2.0 * ensure_positive("width", width)?))
}

/// Time for the width to double, √3 / rate
pub fn doubling_time(initial_width: f64, mass: f64) -> Result<f64> {
    let rate = spreading_rate(initial_width, mass)?;
    Ok(3.0_f64.sqrt() / rate)
}

/// λ = h / p
pub fn de_broglie_wavelength(momentum: f64) -> Result<f64> {
    if momentum == 0.0 || !momentum.is_finite() {
        return Err(DomainError::Zero {
            name: "momentum",
            value: momentum,
        });
    }
    Ok(PLANCK / momentum.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use common::constants::ELECTRON_MASS;

    #[test]
    fn test_width_grows_from_initial() {
        let sigma = 1e-9;
        assert_relative_eq!(width(sigma, ELECTRON_MASS, 0.0).unwrap(), sigma);
        let rate = spreading_rate(sigma, ELECTRON_MASS).unwrap();
        // At t = 1/rate the width has grown by √2
        assert_relative_eq!(
            width(sigma, ELECTRON_MASS, 1.0 / rate).unwrap(),
            sigma * 2.0_f64.sqrt(),
            max_relative = 1e-12
        );
        assert!(width(0.0, ELECTRON_MASS, 1.0).is_err());
        assert!(width(sigma, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_doubling_time() {
        let sigma = 2e-10;
        let t = doubling_time(sigma, ELECTRON_MASS).unwrap();
        assert!(t > 0.0);
        assert_relative_eq!(
            width(sigma, ELECTRON_MASS, t).unwrap(),
            2.0 * sigma,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_velocities() {
        let k = 1e10;
        let vg = group_velocity(k, ELECTRON_MASS).unwrap();
        assert_relative_eq!(vg, HBAR * k / ELECTRON_MASS);
        assert_relative_eq!(phase_velocity(k, ELECTRON_MASS).unwrap(), vg / 2.0);
        assert!(group_velocity(k, 0.0).is_err());
        assert_relative_eq!(center_position(1.0, vg, 2.0), 1.0 + 2.0 * vg);
    }

    #[test]
    fn test_uncertainty() {
        let sigma = 5e-10;
        let dp = momentum_uncertainty(sigma).unwrap();
        assert!(is_minimum_uncertainty(sigma, dp));
        assert!(is_minimum_uncertainty(sigma, dp * 1.005));
        assert!(!is_minimum_uncertainty(sigma, dp * 1.05));
        assert_relative_eq!(sigma * dp, minimum_uncertainty_product());
        assert!(momentum_uncertainty(0.0).is_err());
    }

    #[test]
    fn test_de_broglie() {
        // 1 eV electron: λ ≈ 1.226 nm
        let p = (2.0 * ELECTRON_MASS * 1.602_176_634e-19).sqrt();
        assert_relative_eq!(de_broglie_wavelength(p).unwrap(), 1.226e-9, max_relative = 1e-3);
        assert_relative_eq!(
            de_broglie_wavelength(-p).unwrap(),
            de_broglie_wavelength(p).unwrap()
        );
        assert!(de_broglie_wavelength(0.0).is_err());
    }
}
