//! Observables computed from the probability density of a state
//!
//! All positions are cell indices. Functions take the state by reference
//! and never modify it.

use crate::wavefunction::{Complex, WaveFunctionState};
use common::error::{ensure_len, Result};
use common::Measurements;
use rand::Rng;

/// Cells with less probability than this are skipped by [`entropy`]
pub const ENTROPY_FLOOR: f64 = 1e-10;

/// Grid axis for marginals and splits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    X,
    Y,
}

/// Inclusive rectangle of cells; bounds past the grid edge are clipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Region {
    pub fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MostProbable {
    pub x: usize,
    pub y: usize,
    pub probability: f64,
}

pub fn probability_in_region(state: &WaveFunctionState, region: Region) -> f64 {
    let last = state.grid_size() - 1;
    let (x_max, y_max) = (region.x_max.min(last), region.y_max.min(last));
    if region.x_min > x_max || region.y_min > y_max {
        return 0.0;
    }

    let p = state.probability();
    (region.y_min..=y_max)
        .flat_map(|y| (region.x_min..=x_max).map(move |x| (x, y)))
        .map(|(x, y)| p[state.index(x, y)])
        .sum()
}

/// Probability along `axis`, summed over the other axis
pub fn marginal_distribution(state: &WaveFunctionState, axis: GridAxis) -> Vec<f64> {
    let n = state.grid_size();
    let p = state.probability();
    let mut marginal = vec![0.0; n];
    for y in 0..n {
        for x in 0..n {
            let bin = match axis {
                GridAxis::X => x,
                GridAxis::Y => y,
            };
            marginal[bin] += p[state.index(x, y)];
        }
    }
    marginal
}

/// Running sum of the marginal along `axis`
pub fn cumulative_distribution(state: &WaveFunctionState, axis: GridAxis) -> Vec<f64> {
    marginal_distribution(state, axis)
        .into_iter()
        .scan(0.0, |total, p| {
            *total += p;
            Some(*total)
        })
        .collect()
}

/// Densest cell; the first in row-major order wins ties
pub fn most_probable_position(state: &WaveFunctionState) -> MostProbable {
    let n = state.grid_size();
    let mut best = MostProbable {
        x: 0,
        y: 0,
        probability: 0.0,
    };
    for (i, &p) in state.probability().iter().enumerate() {
        if p > best.probability {
            best = MostProbable {
                x: i % n,
                y: i / n,
                probability: p,
            };
        }
    }
    best
}

/// Shannon entropy -Σ p·ln p over cells above [`ENTROPY_FLOOR`]
pub fn entropy(state: &WaveFunctionState) -> f64 {
    -state
        .probability()
        .iter()
        .filter(|&&p| p > ENTROPY_FLOOR)
        .map(|&p| p * p.ln())
        .sum::<f64>()
}

/// ⟨ψ1|ψ2⟩
pub fn inner_product(a: &WaveFunctionState, b: &WaveFunctionState) -> Result<Complex> {
    ensure_len("state", b.real().len(), a.real().len())?;
    let mut sum = Complex::ZERO;
    for i in 0..a.real().len() {
        let psi1 = Complex::new(a.real()[i], a.imaginary()[i]);
        let psi2 = Complex::new(b.real()[i], b.imaginary()[i]);
        sum += psi1.conj() * psi2;
    }
    Ok(sum)
}

/// |⟨ψ1|ψ2⟩|
pub fn overlap(a: &WaveFunctionState, b: &WaveFunctionState) -> Result<f64> {
    Ok(inner_product(a, b)?.norm())
}

/// |⟨ψ0|ψ(t)⟩|²
pub fn survival_probability(
    initial: &WaveFunctionState,
    current: &WaveFunctionState,
) -> Result<f64> {
    Ok(inner_product(initial, current)?.norm_sq())
}

/// Draw a cell with probability proportional to its density.
///
/// Falls back to (0, 0) when the state holds less total probability than
/// the draw, as happens once mass has been absorbed at the boundary.
pub fn sample_position<R: Rng + ?Sized>(state: &WaveFunctionState, rng: &mut R) -> (usize, usize) {
    let n = state.grid_size();
    let target: f64 = rng.gen();
    let mut total = 0.0;
    for (i, &p) in state.probability().iter().enumerate() {
        total += p;
        if total >= target {
            return (i % n, i / n);
        }
    }
    (0, 0)
}

/// Probability before grid line `index` along `axis` and at or after it,
/// e.g. reflected and transmitted mass around a barrier.
pub fn split_probability(state: &WaveFunctionState, axis: GridAxis, index: usize) -> (f64, f64) {
    let marginal = marginal_distribution(state, axis);
    let split = index.min(marginal.len());
    let before: f64 = marginal[..split].iter().sum();
    let after: f64 = marginal[split..].iter().sum();
    (before, after)
}

pub fn measurements(state: &WaveFunctionState) -> Measurements {
    let peak = most_probable_position(state);
    Measurements::new()
        .with("totalProbability", state.total_probability())
        .with("entropy", entropy(state))
        .with("mostProbableX", peak.x as f64)
        .with("mostProbableY", peak.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavefunction::GaussianPacket;
    use approx::assert_relative_eq;
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn point_mass(grid: usize, x: usize, y: usize) -> WaveFunctionState {
        let mut real = vec![0.0; grid * grid];
        real[y * grid + x] = 1.0;
        WaveFunctionState::from_components(real, vec![0.0; grid * grid], grid, 1e-9).unwrap()
    }

    fn uniform(grid: usize) -> WaveFunctionState {
        WaveFunctionState::plane_wave(0.0, 0.0, grid, 1e-9).unwrap()
    }

    #[test]
    fn test_region_is_inclusive_and_clipped() {
        let state = uniform(4);
        assert_relative_eq!(probability_in_region(&state, Region::new(0, 1, 0, 1)), 0.25);
        assert_relative_eq!(probability_in_region(&state, Region::new(2, 99, 0, 99)), 0.5);
        assert_eq!(probability_in_region(&state, Region::new(3, 1, 0, 3)), 0.0);
        assert_eq!(probability_in_region(&state, Region::new(7, 9, 0, 3)), 0.0);
    }

    #[test]
    fn test_marginals() {
        let state = point_mass(5, 3, 1);
        assert_eq!(marginal_distribution(&state, GridAxis::X), vec![0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(marginal_distribution(&state, GridAxis::Y), vec![0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            cumulative_distribution(&state, GridAxis::X),
            vec![0.0, 0.0, 0.0, 1.0, 1.0]
        );

        let flat = cumulative_distribution(&uniform(4), GridAxis::Y);
        assert_relative_eq!(flat[1], 0.5);
        assert_relative_eq!(flat[3], 1.0);
    }

    #[test]
    fn test_most_probable_ties_go_to_first_cell() {
        let peak = most_probable_position(&uniform(4));
        assert_eq!((peak.x, peak.y), (0, 0));

        let peak = most_probable_position(&point_mass(5, 2, 4));
        assert_eq!((peak.x, peak.y), (2, 4));
        assert_relative_eq!(peak.probability, 1.0);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(entropy(&point_mass(4, 1, 1)), 0.0);
        assert_relative_eq!(entropy(&uniform(4)), 16.0_f64.ln(), max_relative = 1e-12);

        let empty =
            WaveFunctionState::from_components(vec![0.0; 9], vec![0.0; 9], 3, 1e-9).unwrap();
        assert_eq!(entropy(&empty), 0.0);
    }

    #[test]
    fn test_overlap() {
        let a = point_mass(4, 1, 1);
        let b = point_mass(4, 2, 2);
        assert_eq!(overlap(&a, &b).unwrap(), 0.0);
        assert_relative_eq!(overlap(&a, &a).unwrap(), 1.0);
        assert!(overlap(&a, &point_mass(5, 1, 1)).is_err());

        // A global phase does not change the overlap
        let k = WaveFunctionState::plane_wave(0.4, 0.0, 8, 1e-9).unwrap();
        assert_relative_eq!(survival_probability(&k, &k).unwrap(), 1.0, max_relative = 1e-12);
        let orthogonal = WaveFunctionState::plane_wave(std::f64::consts::PI / 4.0, 0.0, 8, 1e-9)
            .unwrap();
        assert!(overlap(&uniform(8), &orthogonal).unwrap() < 1e-12);
    }

    #[test]
    fn test_sampling_follows_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = point_mass(6, 4, 2);
        for _ in 0..20 {
            assert_eq!(sample_position(&state, &mut rng), (4, 2));
        }

        let packet = GaussianPacket::centered(DVec2::new(8.0, 8.0), 2.0).unwrap();
        let state = WaveFunctionState::gaussian_packet(packet, 17, 1e-9).unwrap();
        let draws: Vec<_> = (0..500).map(|_| sample_position(&state, &mut rng)).collect();
        let near = draws
            .iter()
            .filter(|&&(x, y)| x.abs_diff(8) <= 4 && y.abs_diff(8) <= 4)
            .count();
        assert!(near > 450);
    }

    #[test]
    fn test_sampling_falls_back_when_absorbed() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty =
            WaveFunctionState::from_components(vec![0.0; 16], vec![0.0; 16], 4, 1e-9).unwrap();
        assert_eq!(sample_position(&empty, &mut rng), (0, 0));
    }

    #[test]
    fn test_split_and_measurements() {
        let state = uniform(4);
        let (before, after) = split_probability(&state, GridAxis::X, 1);
        assert_relative_eq!(before, 0.25);
        assert_relative_eq!(after, 0.75);
        assert_eq!(split_probability(&state, GridAxis::Y, 10).1, 0.0);

        let m = measurements(&point_mass(5, 3, 2));
        assert_eq!(m.get("totalProbability"), Some(1.0));
        assert_eq!(m.get("entropy"), Some(0.0));
        assert_eq!(m.get("mostProbableX"), Some(3.0));
        assert_eq!(m.get("mostProbableY"), Some(2.0));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::wavefunction::GaussianPacket;
    use glam::DVec2;
    use proptest::prelude::*;

    fn arb_state() -> impl Strategy<Value = WaveFunctionState> {
        (2.0..14.0_f64, 2.0..14.0_f64, 0.8..4.0_f64, -2.0..2.0_f64).prop_map(
            |(cx, cy, sigma, k)| {
                let packet = GaussianPacket::centered(DVec2::new(cx, cy), sigma)
                    .unwrap()
                    .with_wave_vector(DVec2::new(k, -k));
                WaveFunctionState::gaussian_packet(packet, 16, 1e-9).unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn marginals_carry_all_probability(state in arb_state()) {
            let total = state.total_probability();
            for axis in [GridAxis::X, GridAxis::Y] {
                let sum: f64 = marginal_distribution(&state, axis).iter().sum();
                prop_assert!((sum - total).abs() < 1e-12);
                let cumulative = cumulative_distribution(&state, axis);
                prop_assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
            }
        }

        #[test]
        fn entropy_is_bounded(state in arb_state()) {
            let s = entropy(&state);
            prop_assert!(s >= 0.0);
            prop_assert!(s <= (256.0_f64).ln() + 1e-9);
        }

        #[test]
        fn split_partitions_mass(state in arb_state(), index in 0usize..20) {
            let (before, after) = split_probability(&state, GridAxis::X, index);
            prop_assert!((before + after - state.total_probability()).abs() < 1e-12);
        }
    }
}
