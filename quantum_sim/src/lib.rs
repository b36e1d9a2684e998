//! Quantum wave mechanics on a 2D grid
//!
//! - **Wavefunctions**: Gaussian packets and plane waves with their observables
//! - **Potentials**: walls, slits, steps and wells sampled onto the grid
//! - **Solver**: split-step evolution with an absorbing boundary
//! - **Wave packets**: closed-form spreading and uncertainty relations
//! - **Probability**: regional mass, marginals, entropy, overlap and sampling
//! - **Interference**: far-field double-slit fringes and diffraction envelope

pub mod interference;
pub mod potential;
pub mod probability;
pub mod solver;
pub mod wave_packet;
pub mod wavefunction;

pub use interference::DoubleSlitSetup;
pub use potential::{Barrier, PotentialField};
pub use probability::{GridAxis, Region};
pub use solver::{evolve, evolve_steps, expected_energy};
pub use wavefunction::{Complex, GaussianPacket, WaveFunctionState};
