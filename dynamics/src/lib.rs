//! Classical dynamics
//!
//! One generic RK4 stepper drives two systems: a point charge moving through
//! the Coulomb field of fixed nuclei (with the Rutherford experiment built on
//! top) and a damped simple pendulum. The fictitious forces of a rotating
//! frame cover the Foucault pendulum.

pub mod analysis;
pub mod pendulum;
pub mod rk4;
pub mod rotating_frame;
pub mod rutherford;
pub mod trajectory;

pub use pendulum::{PendulumPhase, PendulumRun, PendulumState};
pub use rk4::rk4_step;
pub use rutherford::{simulate, RutherfordConfig, ScatteringRun};
pub use trajectory::{
    integrate, ChargedParticleState, PhaseState, SourceCharge, Termination, Trajectory,
    TrajectoryConfig, TrajectorySample,
};
