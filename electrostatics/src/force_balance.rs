//! Charged oil droplet held between plates (Millikan)
//!
//! Vertical forces only, positive up. Fields in V/m, radii in metres.

use common::constants::{AIR_VISCOSITY, STANDARD_GRAVITY};
use common::error::{ensure_non_zero, ensure_positive, Result};
use std::f64::consts::PI;

/// kg/m³
pub const OIL_DENSITY: f64 = 900.0;

/// Multiples of the drag time constant after which a droplet is taken to
/// move at terminal velocity
pub const SETTLING_TIME_CONSTANTS: f64 = 5.0;

/// Weight m·g
pub fn gravitational_force(mass: f64) -> f64 {
    mass * STANDARD_GRAVITY
}

/// q·E, upward for positive charge in an upward field
pub fn electric_force(charge: f64, field: f64) -> f64 {
    charge * field
}

/// Stokes drag 6πηrv, signed with the velocity
pub fn drag_force(radius: f64, velocity: f64, viscosity: f64) -> f64 {
    6.0 * PI * viscosity * radius * velocity
}

/// m = (4/3)πr³ρ
pub fn droplet_mass(radius: f64, density: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3) * density
}

/// Falling speed with no field: v = 2r²ρg / 9η
pub fn terminal_velocity(radius: f64, density: f64, viscosity: f64) -> Result<f64> {
    let r = ensure_positive("radius", radius)?;
    let rho = ensure_positive("density", density)?;
    let eta = ensure_positive("viscosity", viscosity)?;
    Ok(2.0 * r * r * rho * STANDARD_GRAVITY / (9.0 * eta))
}

/// Inverse of [`terminal_velocity`]: r = √(9ηv / 2ρg)
pub fn radius_from_terminal_velocity(velocity: f64, density: f64, viscosity: f64) -> Result<f64> {
    let v = ensure_positive("terminal velocity", velocity)?;
    let rho = ensure_positive("density", density)?;
    let eta = ensure_positive("viscosity", viscosity)?;
    Ok((9.0 * eta * v / (2.0 * rho * STANDARD_GRAVITY)).sqrt())
}

/// Field magnitude that holds the droplet still: E = mg/|q|
pub fn balancing_field(mass: f64, charge: f64) -> Result<f64> {
    let q = ensure_non_zero("charge", charge)?;
    Ok(gravitational_force(mass) / q.abs())
}

/// Charge read off a balanced droplet: q = mg/E
pub fn charge_from_balance(mass: f64, field: f64) -> Result<f64> {
    let e = ensure_non_zero("field", field)?;
    Ok(gravitational_force(mass) / e)
}

/// Electric force minus weight minus drag; drag always opposes the motion.
pub fn net_force(
    mass: f64,
    charge: f64,
    field: f64,
    velocity: f64,
    radius: f64,
    viscosity: f64,
) -> f64 {
    electric_force(charge, field)
        - gravitational_force(mass)
        - drag_force(radius, velocity, viscosity)
}

/// At rest with the electric force within `tolerance` (a fraction of the
/// weight) of gravity. `velocity` must also be below `tolerance` in m/s.
pub fn is_in_equilibrium(
    mass: f64,
    charge: f64,
    field: f64,
    velocity: f64,
    tolerance: f64,
) -> bool {
    let weight = gravitational_force(mass);
    let imbalance = (electric_force(charge, field) - weight).abs();
    velocity.abs() < tolerance && imbalance <= tolerance * weight.abs()
}

/// Drag time constant τ = m / 6πηr
pub fn drag_time_constant(mass: f64, radius: f64, viscosity: f64) -> Result<f64> {
    let r = ensure_positive("radius", radius)?;
    let eta = ensure_positive("viscosity", viscosity)?;
    Ok(ensure_positive("mass", mass)? / (6.0 * PI * eta * r))
}

/// Time to settle at terminal velocity, [`SETTLING_TIME_CONSTANTS`]·τ
pub fn time_to_equilibrium(mass: f64, radius: f64, viscosity: f64) -> Result<f64> {
    Ok(SETTLING_TIME_CONSTANTS * drag_time_constant(mass, radius, viscosity)?)
}

/// One oil droplet in air
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Droplet {
    /// m
    pub radius: f64,
    /// C
    pub charge: f64,
    /// kg/m³
    pub density: f64,
    /// Pa·s of the surrounding gas
    pub viscosity: f64,
}

impl Droplet {
    pub fn new(radius: f64, charge: f64) -> Result<Self> {
        Ok(Self {
            radius: ensure_positive("radius", radius)?,
            charge,
            density: OIL_DENSITY,
            viscosity: AIR_VISCOSITY,
        })
    }

    pub fn with_density(mut self, density: f64) -> Result<Self> {
        self.density = ensure_positive("density", density)?;
        Ok(self)
    }

    pub fn with_viscosity(mut self, viscosity: f64) -> Result<Self> {
        self.viscosity = ensure_positive("viscosity", viscosity)?;
        Ok(self)
    }

    pub fn mass(&self) -> f64 {
        droplet_mass(self.radius, self.density)
    }

    pub fn terminal_velocity(&self) -> Result<f64> {
        terminal_velocity(self.radius, self.density, self.viscosity)
    }

    pub fn balancing_field(&self) -> Result<f64> {
        balancing_field(self.mass(), self.charge)
    }

    pub fn net_force(&self, field: f64, velocity: f64) -> f64 {
        net_force(self.mass(), self.charge, field, velocity, self.radius, self.viscosity)
    }

    pub fn time_to_equilibrium(&self) -> Result<f64> {
        time_to_equilibrium(self.mass(), self.radius, self.viscosity)
    }
}
