//! Rutherford experiment: an alpha particle fired past a fixed nucleus
//!
//! Lengths are scaled by the predicted closest approach `r_c`, so the same
//! settings work from eV to MeV beams.

use crate::analysis::{calculate_scattering_angle, find_closest_approach, ClosestApproach};
use crate::trajectory::{
    integrate, ChargedParticleState, SourceCharge, Trajectory, TrajectoryConfig,
};
use common::error::{ensure_positive, DomainError, Result};
use common::Measurements;
use glam::DVec3;
use nuclear::{ev_to_joules, ScatteringParameters};
use std::time::Duration;

/// Geometry and resolution of a scattering run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RutherfordConfig {
    /// Particle starts at x = -start_factor·r_c
    pub start_factor: f64,
    /// Simulated time is travel_factor·r_c / v0
    pub travel_factor: f64,
    /// Run ends once beyond escape_factor·r_c and receding
    pub escape_factor: f64,
    pub steps: usize,
    pub step_budget: Option<usize>,
    pub time_budget: Option<Duration>,
}

impl Default for RutherfordConfig {
    fn default() -> Self {
        Self {
            start_factor: 10.0,
            travel_factor: 30.0,
            escape_factor: 12.0,
            steps: 20_000,
            step_budget: None,
            time_budget: None,
        }
    }
}

impl RutherfordConfig {
    pub fn with_start_factor(mut self, factor: f64) -> Self {
        self.start_factor = factor;
        self
    }

    pub fn with_travel_factor(mut self, factor: f64) -> Self {
        self.travel_factor = factor;
        self
    }

    pub fn with_escape_factor(mut self, factor: f64) -> Self {
        self.escape_factor = factor;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
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

    /// Coarse run for interactive previews
    pub fn preset_preview() -> Self {
        Self::default().with_steps(2_000)
    }
}

/// Outcome of one scattering run
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringRun {
    pub params: ScatteringParameters,
    pub initial_velocity: DVec3,
    pub trajectory: Trajectory,
    pub closest_approach: Option<ClosestApproach>,
    /// Deflection measured from the outgoing direction
    pub scattering_angle: f64,
    pub predicted_angle: f64,
    pub predicted_closest_approach: f64,
}

impl ScatteringRun {
    pub fn measurements(&self) -> Measurements {
        let mut m = Measurements::new()
            .with("scatteringAngle", self.scattering_angle)
            .with("predictedScatteringAngle", self.predicted_angle)
            .with("predictedClosestApproach", self.predicted_closest_approach)
            .with("impactParameter", self.params.impact_parameter);
        if let Some(closest) = self.closest_approach {
            m.insert("closestApproach", closest.distance);
        }
        m
    }
}

/// Fire `params.mass` with kinetic energy `params.energy` along +x at a
/// nucleus fixed at the origin, offset by the impact parameter in y.
///
/// Only repulsive pairs are accepted: the start distance and the predicted
/// angle both come from the repulsive closed forms.
pub fn simulate(
    params: &ScatteringParameters,
    config: &RutherfordConfig,
) -> Result<ScatteringRun> {
    if !params.is_repulsive() {
        return Err(DomainError::AttractivePair {
            charge1: params.charge1,
            charge2: params.charge2,
        });
    }
    ensure_positive("start factor", config.start_factor)?;
    ensure_positive("travel factor", config.travel_factor)?;
    ensure_positive("escape factor", config.escape_factor)?;
    if config.escape_factor <= config.start_factor {
        return Err(DomainError::OutOfRange {
            name: "escape factor",
            value: config.escape_factor,
            min: config.start_factor,
            max: f64::INFINITY,
        });
    }

    let predicted_angle = params.scattering_angle();
    let scale = params.closest_approach();
    let speed = (2.0 * ev_to_joules(params.energy) / params.mass).sqrt();

    let initial_velocity = DVec3::new(speed, 0.0, 0.0);
    let start = DVec3::new(-config.start_factor * scale, params.impact_parameter, 0.0);
    let alpha = ChargedParticleState::new(start, initial_velocity, params.mass, params.charge1)?;
    let nucleus = SourceCharge::at_origin(params.charge2);

    let duration = config.travel_factor * scale / speed;
    let trajectory_config = TrajectoryConfig {
        step_budget: config.step_budget,
        time_budget: config.time_budget,
        ..TrajectoryConfig::new(duration, config.steps)
            .with_escape_radius(config.escape_factor * scale)
    };

    let trajectory = integrate(&alpha, &[nucleus], &trajectory_config)?;
    let positions = trajectory.positions();

    Ok(ScatteringRun {
        params: *params,
        initial_velocity,
        closest_approach: find_closest_approach(&positions, nucleus.position),
        scattering_angle: calculate_scattering_angle(&positions, initial_velocity),
        predicted_angle,
        predicted_closest_approach: scale,
        trajectory,
    })
}
