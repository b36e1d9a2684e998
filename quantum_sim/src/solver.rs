//! Split-step time evolution of the 2D Schrödinger equation
//!
//! Each step applies a half-step potential phase, a full finite-difference
//! kinetic step and another half-step potential phase. Every sub-step
//! writes a fresh state, so callers can keep the input as history.
//!
//! Boundary cells are held at zero. Probability that reaches the edge is
//! absorbed rather than reflected, so the total probability of a state
//! decays once the packet touches the boundary.

use crate::potential::PotentialField;
use crate::wavefunction::{Complex, WaveFunctionState};
use common::constants::HBAR;
use common::error::{ensure_len, ensure_positive, DomainError, Result};
use log::{debug, warn};

/// Multiply every cell by e^(-iV·dt/ħ)
pub fn apply_potential_operator(
    state: &WaveFunctionState,
    potential: &PotentialField,
    dt: f64,
) -> Result<WaveFunctionState> {
    ensure_matching_grid(state, potential)?;

    let cells = state.real().len();
    let mut real = Vec::with_capacity(cells);
    let mut imaginary = Vec::with_capacity(cells);
    for i in 0..cells {
        let psi = Complex::new(state.real()[i], state.imaginary()[i]);
        let rotated = psi * Complex::exp_i(-potential.values()[i] * dt / HBAR);
        real.push(rotated.re);
        imaginary.push(rotated.im);
    }

    Ok(WaveFunctionState::from_parts(
        real,
        imaginary,
        state.grid_size(),
        state.dx(),
    ))
}

/// ψ ← ψ + i·(ħ·dt / 2m·dx²)·∇²ψ over interior cells, with a five-point
/// Laplacian. The boundary ring of the result is zero.
pub fn apply_kinetic_operator(
    state: &WaveFunctionState,
    dt: f64,
    mass: f64,
) -> Result<WaveFunctionState> {
    ensure_positive("mass", mass)?;

    let n = state.grid_size();
    let dx = state.dx();
    let factor = HBAR * dt / (2.0 * mass * dx * dx);
    let re = state.real();
    let im = state.imaginary();

    let mut real = vec![0.0; n * n];
    let mut imaginary = vec![0.0; n * n];
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let i = y * n + x;
            let laplacian = Complex::new(
                re[i + 1] + re[i - 1] + re[i + n] + re[i - n] - 4.0 * re[i],
                im[i + 1] + im[i - 1] + im[i + n] + im[i - n] - 4.0 * im[i],
            );
            let psi = Complex::new(re[i], im[i]) + Complex::I * laplacian * factor;
            real[i] = psi.re;
            imaginary[i] = psi.im;
        }
    }

    Ok(WaveFunctionState::from_parts(real, imaginary, n, dx))
}

/// Advance `state` by one split step of `dt` seconds
pub fn evolve(
    state: &WaveFunctionState,
    potential: &PotentialField,
    dt: f64,
    mass: f64,
) -> Result<WaveFunctionState> {
    ensure_positive("time step", dt)?;
    ensure_positive("mass", mass)?;
    ensure_matching_grid(state, potential)?;

    let half = apply_potential_operator(state, potential, dt / 2.0)?;
    let kinetic = apply_kinetic_operator(&half, dt, mass)?;
    let next = absorb_boundary(apply_potential_operator(&kinetic, potential, dt / 2.0)?);

    if let Some(index) = next.first_non_finite() {
        warn!("wave evolution diverged at cell {} with dt = {:e}", index, dt);
        return Err(DomainError::NonFiniteState { index });
    }
    Ok(next)
}

/// Chain `steps` calls to [`evolve`]
pub fn evolve_steps(
    state: &WaveFunctionState,
    potential: &PotentialField,
    dt: f64,
    mass: f64,
    steps: usize,
) -> Result<WaveFunctionState> {
    let mut current = state.clone();
    for _ in 0..steps {
        current = evolve(&current, potential, dt, mass)?;
    }
    debug!(
        "evolved {} steps, total probability {:.6}",
        steps,
        current.total_probability()
    );
    Ok(current)
}

/// ⟨H⟩ summed over interior cells, in joules
pub fn expected_energy(
    state: &WaveFunctionState,
    potential: &PotentialField,
    mass: f64,
) -> Result<f64> {
    ensure_positive("mass", mass)?;
    ensure_matching_grid(state, potential)?;

    let n = state.grid_size();
    let dx = state.dx();
    let kinetic_factor = -HBAR * HBAR / (2.0 * mass * dx * dx);
    let re = state.real();
    let im = state.imaginary();
    let p = state.probability();
    let v = potential.values();

    let mut energy = 0.0;
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let i = y * n + x;
            let lap_re = re[i + 1] + re[i - 1] + re[i + n] + re[i - n] - 4.0 * re[i];
            let lap_im = im[i + 1] + im[i - 1] + im[i + n] + im[i - n] - 4.0 * im[i];
            energy += kinetic_factor * (re[i] * lap_re + im[i] * lap_im) + v[i] * p[i];
        }
    }
    Ok(energy)
}

/// Zero the outermost ring of cells
fn absorb_boundary(state: WaveFunctionState) -> WaveFunctionState {
    let n = state.grid_size();
    let dx = state.dx();
    let on_edge = |i: usize| {
        let (x, y) = (i % n, i / n);
        x == 0 || y == 0 || x == n - 1 || y == n - 1
    };

    let mut real = state.real().to_vec();
    let mut imaginary = state.imaginary().to_vec();
    for i in (0..n * n).filter(|&i| on_edge(i)) {
        real[i] = 0.0;
        imaginary[i] = 0.0;
    }
    WaveFunctionState::from_parts(real, imaginary, n, dx)
}

fn ensure_matching_grid(state: &WaveFunctionState, potential: &PotentialField) -> Result<()> {
    ensure_len(
        "potential",
        potential.values().len(),
        state.real().len(),
    )
}
