//! Nuclear scattering
//!
//! Coulomb interaction between point nuclei and the closed-form Rutherford
//! relations. Charges are in units of the elementary charge, energies in eV
//! and lengths in metres.

pub mod coulomb;
pub mod impact;
pub mod rutherford;

pub use coulomb::MIN_SEPARATION;
pub use rutherford::ScatteringParameters;

use common::constants::{COULOMB_K, ELEMENTARY_CHARGE};

/// k·q1·q2·e², the numerator shared by every Coulomb relation (J·m)
pub fn coulomb_strength(charge1: f64, charge2: f64) -> f64 {
    COULOMB_K * charge1 * charge2 * ELEMENTARY_CHARGE * ELEMENTARY_CHARGE
}

/// Convert an energy in eV to joules
pub fn ev_to_joules(energy: f64) -> f64 {
    energy * ELEMENTARY_CHARGE
}
