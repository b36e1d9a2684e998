//! Simple pendulum with optional linear damping
//!
//! Angles are measured from the downward vertical, positive counter-clockwise.

use crate::rk4::rk4_step;
use crate::trajectory::Termination;
use common::error::{ensure_non_negative, ensure_positive, DomainError, Result};
use common::Measurements;
use glam::DVec3;
use log::warn;
use std::f64::consts::TAU;
use std::ops::{Add, Mul};

/// Angle and angular velocity, the state the integrator advances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumPhase {
    pub angle: f64,
    pub angular_velocity: f64,
}

impl Add for PendulumPhase {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            angle: self.angle + rhs.angle,
            angular_velocity: self.angular_velocity + rhs.angular_velocity,
        }
    }
}

impl PendulumPhase {
    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.angular_velocity.is_finite()
    }
}

impl Mul<f64> for PendulumPhase {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            angle: self.angle * rhs,
            angular_velocity: self.angular_velocity * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    /// m
    pub length: f64,
    /// kg, only used for forces and energies
    pub mass: f64,
    /// rad
    pub angle: f64,
    /// rad/s
    pub angular_velocity: f64,
    /// 1/s
    pub damping: f64,
}

impl PendulumState {
    pub fn new(length: f64, angle: f64, angular_velocity: f64, damping: f64) -> Result<Self> {
        Ok(Self {
            length: ensure_positive("length", length)?,
            mass: 1.0,
            angle,
            angular_velocity,
            damping: ensure_non_negative("damping", damping)?,
        })
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        self.mass = ensure_positive("mass", mass)?;
        Ok(self)
    }

    pub fn phase(&self) -> PendulumPhase {
        PendulumPhase {
            angle: self.angle,
            angular_velocity: self.angular_velocity,
        }
    }

    pub fn angular_acceleration(&self, g: f64) -> f64 {
        angular_acceleration(self.length, self.angle, self.angular_velocity, self.damping, g)
    }

    /// Advance by one RK4 step
    pub fn step(&self, dt: f64, g: f64) -> Self {
        let next = rk4_step(self.phase(), dt, |s| PendulumPhase {
            angle: s.angular_velocity,
            angular_velocity: angular_acceleration(
                self.length,
                s.angle,
                s.angular_velocity,
                self.damping,
                g,
            ),
        });

        Self {
            angle: next.angle,
            angular_velocity: next.angular_velocity,
            ..*self
        }
    }

    pub fn total_energy(&self, g: f64) -> f64 {
        total_energy(self.mass, self.length, self.angle, self.angular_velocity, g)
    }

    pub fn bob_position(&self) -> DVec3 {
        bob_position(self.length, self.angle)
    }

    /// Integrate `steps` steps of `dt`, recording the start and every step.
    ///
    /// A step that produces a non-finite state is discarded and the run ends
    /// as [`Termination::Diverged`] with the samples taken so far.
    pub fn simulate(&self, dt: f64, steps: usize, g: f64) -> Result<PendulumRun> {
        ensure_positive("time step", dt)?;
        ensure_positive("gravity", g)?;
        if steps == 0 {
            return Err(DomainError::TooFew {
                name: "steps",
                min: 1,
                actual: 0,
            });
        }

        let mut state = *self;
        let mut samples = Vec::with_capacity(steps + 1);
        samples.push(PendulumSample::at(0.0, &state));

        let mut termination = Termination::Completed;
        for i in 1..=steps {
            let next = state.step(dt, g);
            if !next.phase().is_finite() {
                warn!("pendulum step {} produced a non-finite state; dt = {:e}", i, dt);
                termination = Termination::Diverged;
                break;
            }
            state = next;
            samples.push(PendulumSample::at(i as f64 * dt, &state));
        }

        Ok(PendulumRun {
            initial: *self,
            samples,
            termination,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumSample {
    pub time: f64,
    pub angle: f64,
    pub angular_velocity: f64,
}

impl PendulumSample {
    fn at(time: f64, state: &PendulumState) -> Self {
        Self {
            time,
            angle: state.angle,
            angular_velocity: state.angular_velocity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendulumRun {
    pub initial: PendulumState,
    pub samples: Vec<PendulumSample>,
    /// `Completed` or `Diverged`
    pub termination: Termination,
}

impl PendulumRun {
    pub fn is_truncated(&self) -> bool {
        self.termination != Termination::Completed
    }

    /// Times at which the angle changes sign, linearly interpolated
    pub fn zero_crossings(&self) -> Vec<f64> {
        self.samples
            .windows(2)
            .filter_map(|w| {
                let (a, b) = (w[0], w[1]);
                if a.angle == 0.0 || (b.angle != 0.0 && a.angle.signum() == b.angle.signum()) {
                    return None;
                }
                let fraction = a.angle / (a.angle - b.angle);
                Some(a.time + fraction * (b.time - a.time))
            })
            .collect()
    }

    /// Period from the mean spacing of zero crossings; needs at least two
    pub fn measured_period(&self) -> Option<f64> {
        let crossings = self.zero_crossings();
        if crossings.len() < 2 {
            return None;
        }
        let span = crossings[crossings.len() - 1] - crossings[0];
        Some(2.0 * span / (crossings.len() - 1) as f64)
    }

    /// Largest |angle| reached
    pub fn amplitude(&self) -> f64 {
        self.samples.iter().map(|s| s.angle.abs()).fold(0.0, f64::max)
    }

    /// Mechanical energy at every sample
    pub fn energies(&self, g: f64) -> Vec<f64> {
        let p = &self.initial;
        self.samples
            .iter()
            .map(|s| total_energy(p.mass, p.length, s.angle, s.angular_velocity, g))
            .collect()
    }

    pub fn measurements(&self) -> Measurements {
        let mut m = Measurements::new().with("amplitude", self.amplitude());
        if let Some(period) = self.measured_period() {
            m.insert("period", period);
        }
        m
    }
}

/// Small-angle period T = 2π√(L/g)
pub fn period(length: f64, g: f64) -> Result<f64> {
    Ok(TAU / angular_frequency(length, g)?)
}

pub fn frequency(length: f64, g: f64) -> Result<f64> {
    Ok(1.0 / period(length, g)?)
}

/// ω = √(g/L)
pub fn angular_frequency(length: f64, g: f64) -> Result<f64> {
    let l = ensure_positive("length", length)?;
    let g = ensure_positive("gravity", g)?;
    Ok((g / l).sqrt())
}

/// Tangential restoring force F = -m·g·sin θ
pub fn restoring_force(mass: f64, angle: f64, g: f64) -> f64 {
    -mass * g * angle.sin()
}

/// String tension T = m·g·cos θ + m·v²/L
pub fn tension(mass: f64, length: f64, angle: f64, angular_velocity: f64, g: f64) -> f64 {
    let v = angular_velocity * length;
    mass * g * angle.cos() + mass * v * v / length
}

/// Kinetic plus potential energy, zero at rest at the bottom
pub fn total_energy(mass: f64, length: f64, angle: f64, angular_velocity: f64, g: f64) -> f64 {
    let v = angular_velocity * length;
    0.5 * mass * v * v + mass * g * length * (1.0 - angle.cos())
}

/// Speed at the bottom of a swing released from rest at `initial_angle`
pub fn max_velocity(length: f64, initial_angle: f64, g: f64) -> f64 {
    let height = length * (1.0 - initial_angle.cos());
    (2.0 * g * height).sqrt()
}

/// α = -(g/L)·sin θ - damping·ω
pub fn angular_acceleration(
    length: f64,
    angle: f64,
    angular_velocity: f64,
    damping: f64,
    g: f64,
) -> f64 {
    -(g / length) * angle.sin() - damping * angular_velocity
}

/// Bob position relative to the pivot, y pointing up
pub fn bob_position(length: f64, angle: f64) -> DVec3 {
    DVec3::new(length * angle.sin(), -length * angle.cos(), 0.0)
}

pub fn bob_velocity(length: f64, angle: f64, angular_velocity: f64) -> DVec3 {
    let v = length * angular_velocity;
    DVec3::new(v * angle.cos(), v * angle.sin(), 0.0)
}
