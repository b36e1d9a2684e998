//! Common utilities for the physics simulation kernel
//!
//! This crate provides the vector algebra, scalar numerics, physical constants
//! and error types shared by the field, scattering, dynamics and quantum crates.

pub mod error;
pub mod measurement;
pub mod numerics;
pub mod random;
pub mod vector;

pub use error::{DomainError, Result};
pub use measurement::{Measurement, Measurements};
pub use vector::Vector;

/// Physical constants used in simulations (SI units)
pub mod constants {
    /// Coulomb constant k = 1/(4πε₀) in N·m²/C²
    pub const COULOMB_K: f64 = 8.99e9;

    /// Elementary charge in C
    pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

    /// Vacuum permittivity in F/m
    pub const EPSILON_0: f64 = 8.854_187_817e-12;

    /// Reduced Planck constant in J·s
    pub const HBAR: f64 = 1.054_571_817e-34;

    /// Planck constant in J·s
    pub const PLANCK: f64 = 6.626_070_15e-34;

    /// Speed of light in m/s
    pub const C: f64 = 299_792_458.0;

    /// Standard gravitational acceleration in m/s²
    pub const STANDARD_GRAVITY: f64 = 9.81;

    /// Alpha particle mass in kg
    pub const ALPHA_MASS: f64 = 6.64e-27;

    /// Electron mass in kg
    pub const ELECTRON_MASS: f64 = 9.109_383_7e-31;

    /// Earth's sidereal rotation rate in rad/s
    pub const EARTH_ANGULAR_VELOCITY: f64 = 7.292_115_9e-5;

    /// Dynamic viscosity of air at room temperature in Pa·s
    pub const AIR_VISCOSITY: f64 = 1.8e-5;
}
