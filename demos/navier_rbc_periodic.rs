//! Simulate Rayleigh-Benard Convection two dimensional
//! in a periodic domain
//!
//! cargo run --release --example navier_rbc_periodic
use rustrbc::integrate;
use rustrbc::navier::Navier2D;
use rustrbc::RbcConfig;

fn main() -> rustrbc::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // Parameters
    let config = RbcConfig {
        nx: 129,
        ny: 65,
        lx: 2.0,
        ly: 1.0,
        ra: 1e4,
        pr: 1.,
        perturbation: 0.1,
        ..RbcConfig::default()
    };
    let mut navier = Navier2D::from_config(&config)?;
    // Set initial conditions
    navier.random_disturbance(1e-3)?;
    integrate(&mut navier, 0.5, Some(0.05))?;
    Ok(())
}
