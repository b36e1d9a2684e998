//! Classical fourth-order Runge-Kutta

use std::ops::{Add, Mul};

/// Advance `state` by `dt` given its time derivative.
///
/// Any state that can be added and scaled works: a bare `f64`, a glam vector,
/// or a phase-space pair implementing the two operators.
pub fn rk4_step<S, F>(state: S, dt: f64, derivative: F) -> S
where
    S: Copy + Add<Output = S> + Mul<f64, Output = S>,
    F: Fn(S) -> S,
{
    let half = dt * 0.5;

    // k1
    let k1 = derivative(state);

    // k2
    let k2 = derivative(state + k1 * half);

    // k3
    let k3 = derivative(state + k2 * half);

    // k4
    let k4 = derivative(state + k3 * dt);

    state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}
