//! Potential energy landscapes for the wave solver
//!
//! Barrier coordinates are in cell units; heights are in joules.

use crate::wavefunction::ensure_grid;
use common::error::{ensure_len, DomainError, Result};
use glam::DVec2;

/// Potential barrier types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Barrier {
    /// Vertical slab `|x - x_center| < width/2`
    Wall {
        height: f64,
        x_center: f64,
        width: f64,
    },
    /// Radial Gaussian bump
    Gaussian {
        height: f64,
        center: DVec2,
        sigma: f64,
    },
    /// Wall pierced by two slits placed symmetrically about the middle row
    DoubleSlit {
        height: f64,
        x_center: f64,
        thickness: f64,
        slit_width: f64,
        slit_separation: f64,
    },
    /// Constant `height` for `x >= x_position`
    Step { height: f64, x_position: f64 },
    /// V = ½·strength·|r - center|²
    Harmonic { strength: f64, center: DVec2 },
}

impl Barrier {
    /// Evaluate the potential at cell (x, y) of a `grid_size` grid
    pub fn potential_at(&self, x: f64, y: f64, grid_size: usize) -> f64 {
        match *self {
            Barrier::Wall {
                height,
                x_center,
                width,
            } => {
                if (x - x_center).abs() < width / 2.0 {
                    height
                } else {
                    0.0
                }
            }
            Barrier::Gaussian {
                height,
                center,
                sigma,
            } => {
                let r2 = DVec2::new(x, y).distance_squared(center);
                height * (-r2 / (2.0 * sigma * sigma)).exp()
            }
            Barrier::DoubleSlit {
                height,
                x_center,
                thickness,
                slit_width,
                slit_separation,
            } => {
                if (x - x_center).abs() >= thickness / 2.0 {
                    return 0.0;
                }
                let middle = (grid_size as f64 - 1.0) / 2.0;
                let offset = (y - middle).abs();
                let in_slit = (offset - slit_separation / 2.0).abs() < slit_width / 2.0;
                if in_slit { 0.0 } else { height }
            }
            Barrier::Step { height, x_position } => {
                if x >= x_position { height } else { 0.0 }
            }
            Barrier::Harmonic { strength, center } => {
                0.5 * strength * DVec2::new(x, y).distance_squared(center)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DomainError::NotPositive { name, value })
            }
        };
        match *self {
            Barrier::Wall { width, .. } => positive("wall width", width),
            Barrier::Gaussian { sigma, .. } => positive("barrier sigma", sigma),
            Barrier::DoubleSlit {
                thickness,
                slit_width,
                ..
            } => {
                positive("wall thickness", thickness)?;
                positive("slit width", slit_width)
            }
            Barrier::Step { .. } | Barrier::Harmonic { .. } => Ok(()),
        }
    }
}

/// Scalar potential aligned with a wavefunction grid, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialField {
    grid_size: usize,
    values: Vec<f64>,
}

impl PotentialField {
    /// Free space
    pub fn zero(grid_size: usize) -> Result<Self> {
        ensure_grid(grid_size)?;
        Ok(Self {
            grid_size,
            values: vec![0.0; grid_size * grid_size],
        })
    }

    pub fn from_values(values: Vec<f64>, grid_size: usize) -> Result<Self> {
        ensure_grid(grid_size)?;
        ensure_len("potential", values.len(), grid_size * grid_size)?;
        if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
            return Err(DomainError::NotFinite {
                name: "potential",
                value,
            });
        }
        Ok(Self { grid_size, values })
    }

    /// Sample `f(x, y)` at every cell
    pub fn from_fn<F>(grid_size: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> f64,
    {
        ensure_grid(grid_size)?;
        let values = (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::from_values(values, grid_size)
    }

    pub fn from_barrier(barrier: Barrier, grid_size: usize) -> Result<Self> {
        barrier.validate()?;
        Self::from_fn(grid_size, |x, y| {
            barrier.potential_at(x as f64, y as f64, grid_size)
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Value at cell (x, y), or `None` outside the grid
    pub fn value_at(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.grid_size || y >= self.grid_size {
            return None;
        }
        Some(self.values[y * self.grid_size + x])
    }
}
