//! Far-field double-slit pattern
//!
//! Closed forms for the screen pattern that a [`crate::Barrier::DoubleSlit`]
//! produces. Angles are measured from the central axis in radians; lengths
//! are in metres.

use common::error::{ensure_non_negative, ensure_positive, Result};
use std::f64::consts::PI;

/// Below this |β| the single-slit envelope is taken as exactly 1
const ENVELOPE_EPSILON: f64 = 1e-6;

/// Default fraction of a wavelength for the constructive/destructive checks
pub const FRINGE_TOLERANCE: f64 = 0.1;

/// Two-slit interference I = I₀·cos²(πd·sin θ / λ)
pub fn intensity(
    angle: f64,
    wavelength: f64,
    slit_separation: f64,
    max_intensity: f64,
) -> Result<f64> {
    let lambda = ensure_positive("wavelength", wavelength)?;
    let phase = PI * slit_separation * angle.sin() / lambda;
    Ok(max_intensity * phase.cos().powi(2))
}

/// y = nλL/d
pub fn bright_fringe_position(
    order: i32,
    wavelength: f64,
    slit_separation: f64,
    screen_distance: f64,
) -> Result<f64> {
    Ok(order as f64 * fringe_spacing(wavelength, slit_separation, screen_distance)?)
}

/// y = (n + ½)λL/d
pub fn dark_fringe_position(
    order: i32,
    wavelength: f64,
    slit_separation: f64,
    screen_distance: f64,
) -> Result<f64> {
    Ok((order as f64 + 0.5) * fringe_spacing(wavelength, slit_separation, screen_distance)?)
}

/// Δy = λL/d
pub fn fringe_spacing(wavelength: f64, slit_separation: f64, screen_distance: f64) -> Result<f64> {
    let lambda = ensure_positive("wavelength", wavelength)?;
    let d = ensure_positive("slit separation", slit_separation)?;
    let l = ensure_positive("screen distance", screen_distance)?;
    Ok(lambda * l / d)
}

/// Δ = d·sin θ
pub fn path_difference(angle: f64, slit_separation: f64) -> f64 {
    slit_separation * angle.sin()
}

/// Δφ = 2πΔ/λ
pub fn phase_difference(path_difference: f64, wavelength: f64) -> Result<f64> {
    Ok(2.0 * PI * path_difference / ensure_positive("wavelength", wavelength)?)
}

/// Path difference within `tolerance` wavelengths of a whole number
pub fn is_constructive(path_difference: f64, wavelength: f64, tolerance: f64) -> bool {
    let ratio = path_difference / wavelength;
    (ratio - ratio.round()).abs() < tolerance
}

/// Path difference within `tolerance` wavelengths of a half-integer
pub fn is_destructive(path_difference: f64, wavelength: f64, tolerance: f64) -> bool {
    let shifted = path_difference / wavelength - 0.5;
    (shifted - shifted.round()).abs() < tolerance
}

/// Angle of the `order`-th bright fringe; `None` past 90°
pub fn fringe_angle(order: i32, wavelength: f64, slit_separation: f64) -> Option<f64> {
    let sin_theta = order as f64 * wavelength / slit_separation;
    if !sin_theta.is_finite() || sin_theta.abs() > 1.0 {
        return None;
    }
    Some(sin_theta.asin())
}

/// Bright fringes on a screen `screen_width` wide, centred on the axis,
/// counting the central maximum.
pub fn number_of_fringes(
    wavelength: f64,
    slit_separation: f64,
    screen_width: f64,
    screen_distance: f64,
) -> Result<usize> {
    let lambda = ensure_positive("wavelength", wavelength)?;
    let d = ensure_positive("slit separation", slit_separation)?;
    let width = ensure_non_negative("screen width", screen_width)?;
    let l = ensure_positive("screen distance", screen_distance)?;

    let max_angle = (width / (2.0 * l)).atan();
    let max_order = (d * max_angle.sin() / lambda).floor() as usize;
    Ok(2 * max_order + 1)
}

/// Contrast V = (I_max - I_min)/(I_max + I_min); 0 for a dark screen
pub fn visibility(intensity_max: f64, intensity_min: f64) -> f64 {
    let total = intensity_max + intensity_min;
    if total == 0.0 {
        return 0.0;
    }
    (intensity_max - intensity_min) / total
}

/// Single-slit envelope sinc²(πa·sin θ / λ)
pub fn diffraction_envelope(angle: f64, wavelength: f64, slit_width: f64) -> Result<f64> {
    let lambda = ensure_positive("wavelength", wavelength)?;
    let beta = PI * slit_width * angle.sin() / lambda;
    if beta.abs() < ENVELOPE_EPSILON {
        return Ok(1.0);
    }
    let sinc = beta.sin() / beta;
    Ok(sinc * sinc)
}

/// Interference fringes under the single-slit envelope
pub fn combined_pattern(
    angle: f64,
    wavelength: f64,
    slit_separation: f64,
    slit_width: f64,
    max_intensity: f64,
) -> Result<f64> {
    Ok(intensity(angle, wavelength, slit_separation, max_intensity)?
        * diffraction_envelope(angle, wavelength, slit_width)?)
}

/// L_c = λ²/Δλ
pub fn coherence_length(wavelength: f64, spectral_width: f64) -> Result<f64> {
    let lambda = ensure_positive("wavelength", wavelength)?;
    Ok(lambda * lambda / ensure_positive("spectral width", spectral_width)?)
}

/// A double slit and its screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleSlitSetup {
    pub wavelength: f64,
    /// Centre-to-centre distance d
    pub slit_separation: f64,
    /// Width a of each slit
    pub slit_width: f64,
    pub screen_distance: f64,
    pub max_intensity: f64,
}

impl DoubleSlitSetup {
    pub fn new(
        wavelength: f64,
        slit_separation: f64,
        slit_width: f64,
        screen_distance: f64,
    ) -> Result<Self> {
        Ok(Self {
            wavelength: ensure_positive("wavelength", wavelength)?,
            slit_separation: ensure_positive("slit separation", slit_separation)?,
            slit_width: ensure_positive("slit width", slit_width)?,
            screen_distance: ensure_positive("screen distance", screen_distance)?,
            max_intensity: 1.0,
        })
    }

    /// Red He-Ne laser through 0.25 mm slits 0.05 mm wide onto a screen 1 m away
    pub fn preset_helium_neon() -> Result<Self> {
        Self::new(632.8e-9, 0.25e-3, 0.05e-3, 1.0)
    }

    pub fn with_max_intensity(mut self, max_intensity: f64) -> Result<Self> {
        self.max_intensity = ensure_non_negative("max intensity", max_intensity)?;
        Ok(self)
    }

    pub fn fringe_spacing(&self) -> Result<f64> {
        fringe_spacing(self.wavelength, self.slit_separation, self.screen_distance)
    }

    /// Combined intensity at height `y` on the screen
    pub fn intensity_at(&self, y: f64) -> Result<f64> {
        let angle = (y / self.screen_distance).atan();
        combined_pattern(
            angle,
            self.wavelength,
            self.slit_separation,
            self.slit_width,
            self.max_intensity,
        )
    }

    /// `samples` evenly spaced (y, I) pairs across a screen `screen_width` wide
    pub fn screen_pattern(&self, screen_width: f64, samples: usize) -> Result<Vec<(f64, f64)>> {
        let width = ensure_non_negative("screen width", screen_width)?;
        let step = if samples > 1 {
            width / (samples - 1) as f64
        } else {
            0.0
        };
        (0..samples)
            .map(|i| {
                let y = -width / 2.0 + i as f64 * step;
                Ok((y, self.intensity_at(y)?))
            })
            .collect()
    }
}
