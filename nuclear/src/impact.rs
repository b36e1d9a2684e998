//! Impact-parameter sampling and beam geometry

use crate::rutherford::{impact_parameter, scattering_angle};
use common::error::Result;
use common::random::random_range;
use rand::Rng;
use std::f64::consts::PI;

/// Largest impact parameter that still deflects by at least `min_angle`
pub fn maximum(energy: f64, charge1: f64, charge2: f64, min_angle: f64) -> Result<f64> {
    impact_parameter(energy, charge1, charge2, min_angle)
}

/// b uniform on [0, b_max)
pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, max_impact_parameter: f64) -> f64 {
    random_range(rng, 0.0, max_impact_parameter)
}

/// b drawn with density ∝ 2πb, i.e. uniform over the beam's cross-section
pub fn random_weighted<R: Rng + ?Sized>(rng: &mut R, max_impact_parameter: f64) -> f64 {
    max_impact_parameter * rng.gen::<f64>().sqrt()
}

/// dσ = 2πb·db
pub fn cross_section_element(impact_parameter: f64, db: f64) -> f64 {
    2.0 * PI * impact_parameter * db
}

/// Expected number of particles of a uniform beam falling in the ring
/// b_min ≤ b < b_max
pub fn particles_in_range(total_particles: usize, beam_radius: f64, b_min: f64, b_max: f64) -> f64 {
    if beam_radius == 0.0 {
        return 0.0;
    }
    let ring = b_max * b_max - b_min * b_min;
    total_particles as f64 * ring / (beam_radius * beam_radius)
}

/// Mean impact parameter over a uniformly filled disc: ⅔·b_max
pub fn average(max_impact_parameter: f64) -> f64 {
    2.0 / 3.0 * max_impact_parameter
}

/// Most beam particles pass near b_max, so the commonest deflection is the
/// smallest one.
pub fn most_probable_angle(
    energy: f64,
    charge1: f64,
    charge2: f64,
    max_impact_parameter: f64,
) -> Result<f64> {
    scattering_angle(max_impact_parameter, energy, charge1, charge2)
}

/// Solid angle 2π(cos θ_min − cos θ_max) swept by the ring b_min..b_max
pub fn solid_angle(energy: f64, charge1: f64, charge2: f64, b_min: f64, b_max: f64) -> Result<f64> {
    let theta_min = scattering_angle(b_max, energy, charge1, charge2)?;
    let theta_max = scattering_angle(b_min, energy, charge1, charge2)?;
    Ok(2.0 * PI * (theta_min.cos() - theta_max.cos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use common::numerics::mean;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const E: f64 = 5.0e6;

    #[test]
    fn test_uniform_samples_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let b = random_uniform(&mut rng, 1e-13);
            assert!((0.0..1e-13).contains(&b));
        }
    }

    #[test]
    fn test_weighted_mean_matches_disc_average() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples: Vec<f64> = (0..20_000).map(|_| random_weighted(&mut rng, 1.0)).collect();
        assert!(samples.iter().all(|b| (0.0..=1.0).contains(b)));
        assert_relative_eq!(mean(&samples).unwrap(), average(1.0), max_relative = 2e-2);
    }

    #[test]
    fn test_ring_counts() {
        assert_relative_eq!(particles_in_range(1000, 2.0, 0.0, 2.0), 1000.0);
        assert_relative_eq!(particles_in_range(1000, 2.0, 1.0, 2.0), 750.0);
        assert_eq!(particles_in_range(1000, 0.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(cross_section_element(1.0, 0.5), PI);
    }

    #[test]
    fn test_angles_from_beam_edges() {
        let b_max = maximum(E, 2.0, 79.0, 0.1).unwrap();
        assert_relative_eq!(
            most_probable_angle(E, 2.0, 79.0, b_max).unwrap(),
            0.1,
            max_relative = 1e-9
        );

        // Whole beam from the axis out to infinity covers the full sphere
        let all = solid_angle(E, 2.0, 79.0, 0.0, 1e6).unwrap();
        assert_relative_eq!(all, 4.0 * PI, max_relative = 1e-9);

        // Inner edge deflects more, so the swept solid angle is positive
        let ring = solid_angle(E, 2.0, 79.0, b_max / 2.0, b_max).unwrap();
        assert!(ring > 0.0);
    }
}
