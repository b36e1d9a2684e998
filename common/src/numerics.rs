//! Scalar numerics: interpolation, angles, root finding, quadrature and statistics

use crate::error::{DomainError, Result};
use std::f64::consts::{PI, TAU};

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Hermite step: 0 below `edge0`, 1 above `edge1`, 3t² - 2t³ between
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Perlin's step with zero first and second derivatives at both edges: 6t⁵ - 15t⁴ + 10t³
pub fn smootherstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Wrap an angle into [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Smallest signed difference `b - a`, in (-π, π]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_angle(b - a);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Bisection root finder on `[a, b]`.
///
/// Returns `None` when `f(a)` and `f(b)` have the same sign.
pub fn find_root<F>(f: F, a: f64, b: f64, tolerance: f64, max_iterations: usize) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let fb = f(b);

    if fa == 0.0 {
        return Some(a);
    }
    if fb == 0.0 {
        return Some(b);
    }
    if fa * fb > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let c = 0.5 * (a + b);
        let fc = f(c);

        if fc.abs() < tolerance || 0.5 * (b - a) < tolerance {
            return Some(c);
        }

        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }

    Some(0.5 * (a + b))
}

/// Central-difference derivative (f(x+h) - f(x-h)) / 2h
pub fn derivative<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Trapezoidal rule over `n` panels
pub fn integral<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return Err(DomainError::TooFew {
            name: "panel count",
            min: 1,
            actual: 0,
        });
    }

    let h = (b - a) / n as f64;
    let interior: f64 = (1..n).map(|i| f(a + i as f64 * h)).sum();
    Ok((0.5 * (f(a) + f(b)) + interior) * h)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}
