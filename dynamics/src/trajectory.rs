//! Charged-particle trajectories under Coulomb forces
//!
//! A point charge moves through the field of fixed source charges. Each run
//! integrates with [`rk4_step`] for at most `steps` steps and records one
//! sample before every step. Runs stop early at a near-singular approach, when
//! the particle has escaped, when a step stops being finite, or when a step or
//! wall-clock budget runs out. The samples recorded up to that point are kept.

use crate::rk4::rk4_step;
use common::error::{ensure_positive, DomainError, Result};
use glam::DVec3;
use log::{debug, warn};
use nuclear::coulomb::force_vector;
use nuclear::MIN_SEPARATION;
use std::ops::{Add, Mul};
use std::time::{Duration, Instant};

/// A moving point charge (charge in units of e, mass in kg)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedParticleState {
    pub position: DVec3,
    pub velocity: DVec3,
    pub mass: f64,
    pub charge: f64,
}

impl ChargedParticleState {
    pub fn new(position: DVec3, velocity: DVec3, mass: f64, charge: f64) -> Result<Self> {
        Ok(Self {
            position,
            velocity,
            mass: ensure_positive("mass", mass)?,
            charge,
        })
    }

    pub fn phase(&self) -> PhaseState {
        PhaseState {
            position: self.position,
            velocity: self.velocity,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// A fixed charge the particle moves around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceCharge {
    pub charge: f64,
    pub position: DVec3,
}

impl SourceCharge {
    pub fn new(charge: f64, position: DVec3) -> Self {
        Self { charge, position }
    }

    /// Nucleus of charge number `charge` at the origin
    pub fn at_origin(charge: f64) -> Self {
        Self::new(charge, DVec3::ZERO)
    }
}

/// Position and velocity, the state the integrator advances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl PhaseState {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

impl Add for PhaseState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Mul<f64> for PhaseState {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            position: self.position * rhs,
            velocity: self.velocity * rhs,
        }
    }
}

/// Integration settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryConfig {
    /// Simulated time span (s)
    pub duration: f64,
    pub steps: usize,
    /// Closer than this to any source the run ends as singular (m)
    pub min_separation: f64,
    /// Outside this radius of every source and receding, the run ends as escaped
    pub escape_radius: Option<f64>,
    pub step_budget: Option<usize>,
    pub time_budget: Option<Duration>,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            steps: 1000,
            min_separation: MIN_SEPARATION,
            escape_radius: None,
            step_budget: None,
            time_budget: None,
        }
    }
}

impl TrajectoryConfig {
    pub fn new(duration: f64, steps: usize) -> Self {
        Self {
            duration,
            steps,
            ..Self::default()
        }
    }

    pub fn with_min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn with_escape_radius(mut self, radius: f64) -> Self {
        self.escape_radius = Some(radius);
        self
    }

    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Fixed step size
    pub fn dt(&self) -> f64 {
        self.duration / self.steps as f64
    }

    fn validate(&self) -> Result<()> {
        ensure_positive("duration", self.duration)?;
        ensure_positive("min separation", self.min_separation)?;
        if self.steps == 0 {
            return Err(DomainError::TooFew {
                name: "steps",
                min: 1,
                actual: 0,
            });
        }
        if let Some(radius) = self.escape_radius {
            ensure_positive("escape radius", radius)?;
        }
        Ok(())
    }
}

/// One recorded point of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,
    pub position: DVec3,
    pub velocity: DVec3,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All requested steps were taken
    Completed,
    /// Left the escape radius moving away from every source
    Escaped,
    /// Came within `min_separation` of a source
    Singular,
    /// A step produced a non-finite state, which was discarded
    Diverged,
    /// Step or wall-clock budget hit before `steps`
    BudgetExhausted,
}

/// Samples of one integration run, in time order
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
    pub termination: Termination,
}

impl Trajectory {
    /// True when the run stopped before it had a physically complete path
    pub fn is_truncated(&self) -> bool {
        !matches!(
            self.termination,
            Termination::Completed | Termination::Escaped
        )
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Coulomb acceleration of `particle` at `position` from all sources
pub fn acceleration(
    particle: &ChargedParticleState,
    sources: &[SourceCharge],
    position: DVec3,
) -> DVec3 {
    let force = sources.iter().fold(DVec3::ZERO, |total, source| {
        total + force_vector(particle.charge, position, source.charge, source.position)
    });
    force / particle.mass
}

fn nearest_source_distance(sources: &[SourceCharge], position: DVec3) -> f64 {
    sources
        .iter()
        .map(|s| position.distance(s.position))
        .fold(f64::INFINITY, f64::min)
}

fn has_escaped(sources: &[SourceCharge], state: &PhaseState, radius: f64) -> bool {
    sources.iter().all(|s| {
        let offset = state.position - s.position;
        offset.length() > radius && offset.dot(state.velocity) > 0.0
    })
}

/// Integrate `particle` through the field of `sources`.
pub fn integrate(
    particle: &ChargedParticleState,
    sources: &[SourceCharge],
    config: &TrajectoryConfig,
) -> Result<Trajectory> {
    config.validate()?;

    let dt = config.dt();
    let started = Instant::now();
    let mut state = particle.phase();
    let mut samples = Vec::with_capacity(config.steps);
    let mut termination = Termination::Completed;

    let derivative = |s: PhaseState| PhaseState {
        position: s.velocity,
        velocity: acceleration(particle, sources, s.position),
    };

    for i in 0..config.steps {
        let over_steps = config.step_budget.map_or(false, |budget| i >= budget);
        let over_time = config
            .time_budget
            .map_or(false, |budget| started.elapsed() >= budget);
        if over_steps || over_time {
            debug!("trajectory budget exhausted after {} of {} steps", i, config.steps);
            termination = Termination::BudgetExhausted;
            break;
        }

        samples.push(TrajectorySample {
            time: i as f64 * dt,
            position: state.position,
            velocity: state.velocity,
        });

        if nearest_source_distance(sources, state.position) < config.min_separation {
            debug!("trajectory reached a source at step {}", i);
            termination = Termination::Singular;
            break;
        }

        if let Some(radius) = config.escape_radius {
            if i > 0 && has_escaped(sources, &state, radius) {
                termination = Termination::Escaped;
                break;
            }
        }

        let next = rk4_step(state, dt, derivative);
        if !next.is_finite() {
            warn!("trajectory step {} produced a non-finite state; dt = {:e}", i, dt);
            termination = Termination::Diverged;
            break;
        }
        state = next;
    }

    Ok(Trajectory {
        samples,
        termination,
    })
}
