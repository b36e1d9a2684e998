//! Random sampling helpers
//!
//! All functions draw from a caller-supplied generator so a seeded RNG gives
//! reproducible runs.

use glam::DVec3;
use rand::Rng;
use std::f64::consts::TAU;

/// Uniform draw from [min, max); an empty range yields `min`
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Vector with each component uniform in [min, max)
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> DVec3 {
    DVec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Unit vector uniformly distributed on the sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let theta = random_range(rng, 0.0, TAU);
    let phi = random_range(rng, -1.0, 1.0).acos();
    DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_random_range_empty_returns_min() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(random_range(&mut rng, 2.5, 2.5), 2.5);
        assert_eq!(random_range(&mut rng, 0.0, 0.0), 0.0);
        assert_eq!(random_range(&mut rng, 4.0, 1.0), 4.0);
    }

    #[test]
    fn test_random_range_covers_interval() {
        let mut rng = StdRng::seed_from_u64(9);
        let draws: Vec<f64> = (0..2000).map(|_| random_range(&mut rng, 10.0, 20.0)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 15.0).abs() < 0.5);
        assert!(draws.iter().any(|&x| x < 11.0));
        assert!(draws.iter().any(|&x| x > 19.0));
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sum = DVec3::ZERO;
        for _ in 0..2000 {
            let v = random_unit_vector(&mut rng);
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-12);
            sum += v;
        }
        // No preferred direction
        assert!((sum / 2000.0).length() < 0.1);
    }

    #[test]
    fn test_random_vector_components() {
        let mut rng = StdRng::seed_from_u64(3);
        let v = random_vector(&mut rng, 1.0, 2.0);
        assert!(v.min_element() >= 1.0 && v.max_element() < 2.0);
    }
}
