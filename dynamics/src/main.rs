//! Headless Rutherford and pendulum demo
//!
//! Runs a gold-foil scattering sweep and a small-angle pendulum, logging the
//! measured quantities next to the closed-form predictions.
//!
//! Set `RUST_LOG=info` to see the output.

use common::constants::STANDARD_GRAVITY;
use common::Measurements;
use dynamics::{simulate, PendulumState, RutherfordConfig};
use log::{error, info};
use nuclear::rutherford::ScatteringParameters;

const ENERGY_EV: f64 = 5.0e6;
const IMPACT_PARAMETERS: [f64; 5] = [0.0, 5e-15, 1e-14, 5e-14, 1e-13];

fn log_measurements(label: &str, measurements: &Measurements) {
    for m in measurements.iter() {
        info!("{label}: {} = {:.6e}", m.name, m.value);
    }
}

fn run() -> common::Result<()> {
    let config = RutherfordConfig::default();

    for b in IMPACT_PARAMETERS {
        let params = ScatteringParameters::preset_gold_foil(b, ENERGY_EV)?;
        let run = simulate(&params, &config)?;
        info!(
            "b = {:.1e} m: {} samples, {:?}",
            b,
            run.trajectory.len(),
            run.trajectory.termination
        );
        log_measurements("scattering", &run.measurements());
    }

    let pendulum = PendulumState::new(1.0, 0.1, 0.0, 0.0)?;
    let swing = pendulum.simulate(0.001, 10_000, STANDARD_GRAVITY)?;
    info!(
        "pendulum small-angle period = {:.4} s",
        dynamics::pendulum::period(pendulum.length, STANDARD_GRAVITY)?
    );
    log_measurements("pendulum", &swing.measurements());

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("demo failed: {e}");
        std::process::exit(1);
    }
}
