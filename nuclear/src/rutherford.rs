//! Closed-form Rutherford scattering
//!
//! All relations share the length scale `k·q1·q2·e² / (E·e)`, the
//! head-on distance at which the Coulomb energy equals the beam energy.

use crate::{coulomb_strength, ev_to_joules};
use common::constants::ALPHA_MASS;
use common::error::{ensure_non_negative, ensure_non_zero, ensure_positive, DomainError, Result};
use std::f64::consts::PI;

/// One projectile/target pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringParameters {
    /// Impact parameter (m)
    pub impact_parameter: f64,
    /// Beam energy (eV)
    pub energy: f64,
    /// Projectile charge number
    pub charge1: f64,
    /// Target charge number
    pub charge2: f64,
    /// Projectile mass (kg)
    pub mass: f64,
}

impl ScatteringParameters {
    pub fn new(
        impact_parameter: f64,
        energy: f64,
        charge1: f64,
        charge2: f64,
        mass: f64,
    ) -> Result<Self> {
        Ok(Self {
            impact_parameter: ensure_non_negative("impact parameter", impact_parameter)?,
            energy: ensure_positive("energy", energy)?,
            charge1: ensure_non_zero("projectile charge", charge1)?,
            charge2: ensure_non_zero("target charge", charge2)?,
            mass: ensure_positive("mass", mass)?,
        })
    }

    /// Alpha particle on a gold nucleus, the Geiger-Marsden setup
    pub fn preset_gold_foil(impact_parameter: f64, energy: f64) -> Result<Self> {
        Self::new(impact_parameter, energy, 2.0, 79.0, ALPHA_MASS)
    }

    pub fn with_impact_parameter(self, impact_parameter: f64) -> Result<Self> {
        Self::new(
            impact_parameter,
            self.energy,
            self.charge1,
            self.charge2,
            self.mass,
        )
    }

    /// Like-signed charges, the only pairing with a hyperbolic flyby
    pub fn is_repulsive(&self) -> bool {
        self.charge1 * self.charge2 > 0.0
    }

    /// k·q1·q2·e²/(E·e) (m)
    pub fn distance_scale(&self) -> f64 {
        distance_scale(self.energy, self.charge1, self.charge2)
    }

    /// Deflection predicted for this impact parameter
    pub fn scattering_angle(&self) -> f64 {
        angle_from_impact(
            self.impact_parameter,
            self.energy,
            self.charge1,
            self.charge2,
        )
    }

    /// Closest approach along the orbit predicted for this impact parameter
    pub fn closest_approach(&self) -> f64 {
        closest_distance(self.distance_scale(), self.scattering_angle())
    }
}

fn distance_scale(energy: f64, charge1: f64, charge2: f64) -> f64 {
    coulomb_strength(charge1, charge2) / ev_to_joules(energy)
}

fn angle_from_impact(impact_parameter: f64, energy: f64, charge1: f64, charge2: f64) -> f64 {
    if impact_parameter == 0.0 {
        return PI;
    }
    let half_scale = distance_scale(energy, charge1, charge2) / 2.0;
    2.0 * (half_scale / impact_parameter).atan()
}

fn closest_distance(scale: f64, angle: f64) -> f64 {
    scale * (1.0 + 1.0 / (angle / 2.0).sin())
}

fn ensure_pair(energy: f64, charge1: f64, charge2: f64) -> Result<()> {
    ensure_positive("energy", energy)?;
    ensure_non_zero("projectile charge", charge1)?;
    ensure_non_zero("target charge", charge2)?;
    Ok(())
}

/// Scattering angles are meaningful on (0, π].
fn ensure_angle(name: &'static str, angle: f64) -> Result<f64> {
    if angle.is_finite() && angle > 0.0 && angle <= PI {
        Ok(angle)
    } else {
        Err(DomainError::OutOfRange {
            name,
            value: angle,
            min: 0.0,
            max: PI,
        })
    }
}

/// θ = 2·atan(k·q1·q2·e² / (2·E·e·b)); exactly π for a head-on collision
pub fn scattering_angle(
    impact_parameter: f64,
    energy: f64,
    charge1: f64,
    charge2: f64,
) -> Result<f64> {
    ensure_pair(energy, charge1, charge2)?;
    let b = ensure_non_negative("impact parameter", impact_parameter)?;
    Ok(angle_from_impact(b, energy, charge1, charge2))
}

/// b = (k·q1·q2·e² / (2·E·e))·cot(θ/2)
pub fn impact_parameter(energy: f64, charge1: f64, charge2: f64, angle: f64) -> Result<f64> {
    ensure_pair(energy, charge1, charge2)?;
    let theta = ensure_angle("scattering angle", angle)?;
    let half_scale = distance_scale(energy, charge1, charge2) / 2.0;
    Ok(half_scale / (theta / 2.0).tan())
}

/// r_min = (k·q1·q2·e² / (E·e))·(1 + 1/sin(θ/2))
pub fn closest_approach(params: &ScatteringParameters, angle: f64) -> Result<f64> {
    let theta = ensure_angle("scattering angle", angle)?;
    Ok(closest_distance(params.distance_scale(), theta))
}

/// dσ/dΩ = (k·q1·q2·e² / (4·E·e))² / sin⁴(θ/2)
pub fn differential_cross_section(
    energy: f64,
    charge1: f64,
    charge2: f64,
    angle: f64,
) -> Result<f64> {
    ensure_pair(energy, charge1, charge2)?;
    let theta = ensure_angle("scattering angle", angle)?;
    let factor = distance_scale(energy, charge1, charge2) / 4.0;
    Ok(factor * factor / (theta / 2.0).sin().powi(4))
}

/// σ = π·b_max² for deflections larger than `min_angle`
pub fn total_cross_section(energy: f64, charge1: f64, charge2: f64, min_angle: f64) -> Result<f64> {
    let b_max = impact_parameter(energy, charge1, charge2, min_angle)?;
    Ok(PI * b_max * b_max)
}

/// Fraction of a uniform beam of radius `beam_width` deflected beyond `angle`
pub fn fraction_scattered(
    energy: f64,
    charge1: f64,
    charge2: f64,
    angle: f64,
    beam_width: f64,
) -> Result<f64> {
    let width = ensure_positive("beam width", beam_width)?;
    let b = impact_parameter(energy, charge1, charge2, angle)?;
    Ok((b * b) / (width * width))
}

/// Upper bound on the nuclear radius: the head-on closest approach of an
/// alpha particle evaluated at the smallest angle still seen to scatter.
pub fn estimate_nuclear_radius(
    energy: f64,
    charge1: f64,
    charge2: f64,
    min_observed_angle: f64,
) -> Result<f64> {
    let params = ScatteringParameters::new(0.0, energy, charge1, charge2, ALPHA_MASS)?;
    closest_approach(&params, min_observed_angle)
}

/// Coulomb barrier height k·q1·q2·e²/r (J)
pub fn coulomb_barrier(charge1: f64, charge2: f64, distance: f64) -> Result<f64> {
    let r = ensure_positive("distance", distance)?;
    Ok(coulomb_strength(charge1, charge2) / r)
}
