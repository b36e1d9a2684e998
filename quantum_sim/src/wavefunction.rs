//! Wavefunction representation on a square grid
//!
//! Amplitudes are stored as parallel real and imaginary arrays in row-major
//! order (`index = y * grid_size + x`), with a probability cache that is
//! rebuilt whenever a new state is constructed.

use common::error::{ensure_len, ensure_positive, DomainError, Result};
use common::constants::HBAR;
use glam::DVec2;

/// Smallest grid with at least one interior cell
pub const MIN_GRID_SIZE: usize = 3;

/// Norms below this are left alone by [`WaveFunctionState::normalized`]
pub const NORM_EPSILON: f64 = 1e-10;

/// Complex number representation for wavefunctions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// r·e^(iθ)
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self {
            re: r * theta.cos(),
            im: r * theta.sin(),
        }
    }

    /// |z|², the probability density of an amplitude
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude |z|
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Phase angle
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Complex conjugate
    pub fn conj(&self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Unit phasor e^(ix)
    pub fn exp_i(x: f64) -> Self {
        Self {
            re: x.cos(),
            im: x.sin(),
        }
    }

    /// Both parts finite
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl std::ops::Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl std::ops::Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl std::ops::Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::ops::Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::ops::AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

/// Gaussian wave packet parameters, in cell units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPacket {
    pub center: DVec2,
    /// Envelope width along each axis
    pub sigma: DVec2,
    /// Wave vector in radians per cell
    pub k0: DVec2,
}

impl GaussianPacket {
    pub fn new(center: DVec2, sigma: DVec2, k0: DVec2) -> Result<Self> {
        ensure_positive("sigma x", sigma.x)?;
        ensure_positive("sigma y", sigma.y)?;
        if !center.is_finite() || !k0.is_finite() {
            return Err(DomainError::NotFinite {
                name: "packet center or wave vector",
                value: f64::NAN,
            });
        }
        Ok(Self { center, sigma, k0 })
    }

    /// Round packet at rest
    pub fn centered(center: DVec2, sigma: f64) -> Result<Self> {
        Self::new(center, DVec2::splat(sigma), DVec2::ZERO)
    }

    pub fn with_wave_vector(mut self, k0: DVec2) -> Self {
        self.k0 = k0;
        self
    }

    /// Unnormalized amplitude at cell (x, y)
    fn amplitude_at(&self, x: f64, y: f64) -> Complex {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        let envelope = (-dx * dx / (2.0 * self.sigma.x * self.sigma.x)
            - dy * dy / (2.0 * self.sigma.y * self.sigma.y))
            .exp();
        Complex::from_polar(envelope, self.k0.x * dx + self.k0.y * dy)
    }
}

/// Complex amplitude on a `grid_size × grid_size` grid with spacing `dx`
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFunctionState {
    real: Vec<f64>,
    imaginary: Vec<f64>,
    probability: Vec<f64>,
    grid_size: usize,
    dx: f64,
}

impl WaveFunctionState {
    /// Build from raw components, checking sizes and finiteness
    pub fn from_components(
        real: Vec<f64>,
        imaginary: Vec<f64>,
        grid_size: usize,
        dx: f64,
    ) -> Result<Self> {
        ensure_grid(grid_size)?;
        ensure_positive("dx", dx)?;
        let cells = grid_size * grid_size;
        ensure_len("real", real.len(), cells)?;
        ensure_len("imaginary", imaginary.len(), cells)?;
        let state = Self::from_parts(real, imaginary, grid_size, dx);
        match state.first_non_finite() {
            Some(index) => Err(DomainError::NonFiniteState { index }),
            None => Ok(state),
        }
    }

    /// Normalized Gaussian packet
    pub fn gaussian_packet(packet: GaussianPacket, grid_size: usize, dx: f64) -> Result<Self> {
        ensure_grid(grid_size)?;
        ensure_positive("dx", dx)?;

        let cells = grid_size * grid_size;
        let mut real = Vec::with_capacity(cells);
        let mut imaginary = Vec::with_capacity(cells);
        for y in 0..grid_size {
            for x in 0..grid_size {
                let psi = packet.amplitude_at(x as f64, y as f64);
                real.push(psi.re);
                imaginary.push(psi.im);
            }
        }

        Ok(Self::from_parts(real, imaginary, grid_size, dx).normalized())
    }

    /// Plane wave e^(i(kx·x + ky·y)) with amplitude 1/grid_size, so the
    /// probabilities sum to one. Wave vector in radians per cell.
    pub fn plane_wave(kx: f64, ky: f64, grid_size: usize, dx: f64) -> Result<Self> {
        ensure_grid(grid_size)?;
        ensure_positive("dx", dx)?;

        let amplitude = 1.0 / grid_size as f64;
        let cells = grid_size * grid_size;
        let mut real = Vec::with_capacity(cells);
        let mut imaginary = Vec::with_capacity(cells);
        for y in 0..grid_size {
            for x in 0..grid_size {
                let psi = Complex::from_polar(amplitude, kx * x as f64 + ky * y as f64);
                real.push(psi.re);
                imaginary.push(psi.im);
            }
        }

        Ok(Self::from_parts(real, imaginary, grid_size, dx))
    }

    /// Construct without validation, rebuilding the probability cache
    pub(crate) fn from_parts(
        real: Vec<f64>,
        imaginary: Vec<f64>,
        grid_size: usize,
        dx: f64,
    ) -> Self {
        let probability = real
            .iter()
            .zip(&imaginary)
            .map(|(re, im)| re * re + im * im)
            .collect();
        Self {
            real,
            imaginary,
            probability,
            grid_size,
            dx,
        }
    }

    pub fn real(&self) -> &[f64] {
        &self.real
    }

    pub fn imaginary(&self) -> &[f64] {
        &self.imaginary
    }

    pub fn probability(&self) -> &[f64] {
        &self.probability
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Spatial step in metres
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.grid_size + x
    }

    /// Amplitude at cell (x, y), or `None` outside the grid
    pub fn amplitude(&self, x: usize, y: usize) -> Option<Complex> {
        if x >= self.grid_size || y >= self.grid_size {
            return None;
        }
        let i = self.index(x, y);
        Some(Complex::new(self.real[i], self.imaginary[i]))
    }

    pub fn total_probability(&self) -> f64 {
        self.probability.iter().sum()
    }

    /// Copy scaled so the probabilities sum to one. A state with (almost)
    /// no probability left is returned unchanged.
    pub fn normalized(&self) -> Self {
        let norm = self.total_probability().sqrt();
        if norm < NORM_EPSILON {
            return self.clone();
        }
        let scale = 1.0 / norm;
        Self::from_parts(
            self.real.iter().map(|v| v * scale).collect(),
            self.imaginary.iter().map(|v| v * scale).collect(),
            self.grid_size,
            self.dx,
        )
    }

    /// ⟨x⟩, ⟨y⟩ in cell units
    pub fn expectation_position(&self) -> DVec2 {
        let mut sum = DVec2::ZERO;
        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let p = self.probability[self.index(x, y)];
                sum += DVec2::new(x as f64, y as f64) * p;
            }
        }
        sum
    }

    /// ⟨p⟩ from central differences over interior cells, in kg·m/s
    pub fn expectation_momentum(&self) -> DVec2 {
        let n = self.grid_size;
        let two_dx = 2.0 * self.dx;
        let mut sum = DVec2::ZERO;

        for y in 1..n - 1 {
            for x in 1..n - 1 {
                let i = self.index(x, y);
                let d_re = DVec2::new(
                    (self.real[i + 1] - self.real[i - 1]) / two_dx,
                    (self.real[i + n] - self.real[i - n]) / two_dx,
                );
                let d_im = DVec2::new(
                    (self.imaginary[i + 1] - self.imaginary[i - 1]) / two_dx,
                    (self.imaginary[i + n] - self.imaginary[i - n]) / two_dx,
                );
                sum += d_im * self.real[i] - d_re * self.imaginary[i];
            }
        }
        sum * HBAR
    }

    /// Standard deviation of position along each axis, in cell units
    pub fn uncertainty_position(&self) -> DVec2 {
        let mean = self.expectation_position();
        let mut sum = DVec2::ZERO;
        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let p = self.probability[self.index(x, y)];
                let d = DVec2::new(x as f64, y as f64) - mean;
                sum += d * d * p;
            }
        }
        DVec2::new(sum.x.sqrt(), sum.y.sqrt())
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// Index of the first cell whose amplitude is NaN or infinite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.real
            .iter()
            .zip(&self.imaginary)
            .position(|(re, im)| !re.is_finite() || !im.is_finite())
    }
}

pub(crate) fn ensure_grid(grid_size: usize) -> Result<()> {
    if grid_size < MIN_GRID_SIZE {
        return Err(DomainError::GridTooSmall {
            min: MIN_GRID_SIZE,
            actual: grid_size,
        });
    }
    Ok(())
}
