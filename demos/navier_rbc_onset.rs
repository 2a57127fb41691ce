//! Growth of convection rolls slightly above onset (Ra_c = 1708)
//!
//! Prints the rms velocity of every saved step.
//!
//! cargo run --release --example navier_rbc_onset
use rustrbc::navier::functions::{eval_nu, rms_velocity};
use rustrbc::navier::Navier2D;
use rustrbc::{History, RbcConfig};

fn main() {
    env_logger::init();
    let config = RbcConfig {
        nx: 81,
        ny: 41,
        lx: 2.0,
        ra: 3e3,
        perturbation: 1e-3,
        ..RbcConfig::default()
    };
    let mut navier = match Navier2D::from_config(&config) {
        Ok(navier) => navier,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let grid = navier.grid().clone();
    let run = match navier.run(4000, 200) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let (history, err) = History::collect(run);
    println!("{:>8} {:>10} {:>12} {:>10}", "step", "time", "u_rms", "Nu");
    for snap in &history {
        println!(
            "{:>8} {:>10.4} {:>12.4e} {:>10.4}",
            snap.step,
            snap.time,
            rms_velocity(&grid, &snap.fields),
            eval_nu(&grid, &snap.fields)
        );
    }
    if let Some(e) = err {
        eprintln!("run stopped early: {}", e);
        std::process::exit(1);
    }
}
