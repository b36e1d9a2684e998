//! Field sampling for the rendering layer
//!
//! Produces plain data only: dense `{position, field}` grids for arrow plots and
//! polylines that follow the field direction.

use crate::field::{multiple_charges_field, PointCharge};
use bytemuck::{Pod, Zeroable};
use common::error::{DomainError, Result};
use common::vector::Vector;
use glam::DVec3;
use std::f64::consts::PI;

/// One sample of a vector field, laid out for direct upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FieldSample {
    pub position: DVec3,
    pub field: DVec3,
}

/// Axis-aligned sampling volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl FieldBounds {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Cube of half-width `half_extent` centered on the origin
    pub fn cube(half_extent: f64) -> Self {
        Self::new(DVec3::splat(-half_extent), DVec3::splat(half_extent))
    }
}

/// Sample the superposed field on a `(resolution + 1)³` lattice.
///
/// Samples are ordered x-major, then y, then z.
pub fn sample_vector_field(
    charges: &[PointCharge],
    bounds: FieldBounds,
    resolution: usize,
) -> Result<Vec<FieldSample>> {
    if resolution == 0 {
        return Err(DomainError::TooFew {
            name: "field resolution",
            min: 1,
            actual: 0,
        });
    }

    let step = (bounds.max - bounds.min) / resolution as f64;
    let n = resolution + 1;
    let mut samples = Vec::with_capacity(n * n * n);

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let position = bounds.min + step * DVec3::new(i as f64, j as f64, k as f64);
                let field = multiple_charges_field(charges, position);
                samples.push(FieldSample { position, field });
            }
        }
    }

    Ok(samples)
}

/// View samples as raw bytes for a GPU buffer
pub fn as_bytes(samples: &[FieldSample]) -> &[u8] {
    bytemuck::cast_slice(samples)
}

/// Field-line tracing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLineConfig {
    pub count: usize,
    pub max_distance: f64,
    pub steps: usize,
    pub start_radius: f64,
}

impl Default for FieldLineConfig {
    fn default() -> Self {
        Self {
            count: 16,
            max_distance: 10.0,
            steps: 100,
            start_radius: 0.1,
        }
    }
}

impl FieldLineConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_start_radius(mut self, start_radius: f64) -> Self {
        self.start_radius = start_radius;
        self
    }
}

/// Follow the field of a single charge from `start` in fixed-length steps.
///
/// Stops where the field vanishes, when the line runs into the charge (a
/// sink), or once the line is farther than `max_distance` from the charge.
pub fn trace_field_line(
    charge: &PointCharge,
    start: DVec3,
    max_distance: f64,
    steps: usize,
) -> Vec<DVec3> {
    let mut line = Vec::with_capacity(steps + 1);
    line.push(start);

    if steps == 0 {
        return line;
    }

    let step_size = max_distance / steps as f64;
    let mut current = start;

    for _ in 0..steps {
        let direction = charge.field_at(current).normalized();
        if direction == DVec3::ZERO {
            break;
        }

        current = current + direction * step_size;
        line.push(current);

        let distance = current.distance(charge.position);
        if distance > max_distance || distance < step_size {
            break;
        }
    }

    line
}

/// Field lines leaving a charge from points spread over a small sphere
pub fn field_lines(charge: &PointCharge, config: FieldLineConfig) -> Vec<Vec<DVec3>> {
    (0..config.count)
        .map(|i| {
            let fraction = i as f64 / config.count as f64;
            let azimuth = 2.0 * PI * fraction;
            let polar = (2.0 * fraction - 1.0).acos();
            let offset = DVec3::new(
                polar.sin() * azimuth.cos(),
                polar.sin() * azimuth.sin(),
                polar.cos(),
            ) * config.start_radius;

            trace_field_line(
                charge,
                charge.position + offset,
                config.max_distance,
                config.steps,
            )
        })
        .collect()
}
