//! Error types for invalid kernel inputs.

use thiserror::Error;

/// Invalid input rejected at a kernel call boundary.
///
/// Numerical singularities (zero separation, `ln 0`, head-on scattering) are
/// never reported here; they are absorbed where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must be non-zero, got {value}")]
    Zero { name: &'static str, value: f64 },

    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("grid size must be at least {min}, got {actual}")]
    GridTooSmall { min: usize, actual: usize },

    #[error("{name} must be at least {min}, got {actual}")]
    TooFew {
        name: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("charges {charge1} and {charge2} attract; the scattering orbit needs like signs")]
    AttractivePair { charge1: f64, charge2: f64 },

    #[error("evolution produced a non-finite amplitude at cell {index}; reduce dt")]
    NonFiniteState { index: usize },
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Reject non-finite or non-positive values.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NotPositive { name, value })
    }
}

/// Reject non-finite or negative values.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::Negative { name, value })
    }
}

pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NotFinite { name, value })
    }
}

/// Reject zero (and non-finite) values.
pub fn ensure_non_zero(name: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value == 0.0 {
        Err(DomainError::Zero { name, value })
    } else {
        Ok(value)
    }
}

/// Reject values outside the closed interval `[min, max]`.
pub fn ensure_in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(DomainError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

pub fn ensure_len(name: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(DomainError::LengthMismatch {
            name,
            expected,
            actual,
        })
    }
}
