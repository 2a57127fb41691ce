use rustrbc::navier::functions::{divergence_norm, eval_nu, eval_nuvol, eval_re};
use rustrbc::navier::Navier2D;
use rustrbc::{History, RbcConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // Parameters
    let config = RbcConfig {
        nx: 65,
        ny: 33,
        lx: 2.0,
        ly: 1.0,
        ra: 1e4,
        pr: 1.,
        ..RbcConfig::default()
    };
    if let Err(e) = simulate(&config, 2000, 200) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn simulate(config: &RbcConfig, steps: usize, save: usize) -> rustrbc::Result<()> {
    let mut navier = Navier2D::from_config(config)?;
    let (grid, params) = (navier.grid().clone(), *navier.params());
    let (history, err) = History::collect(navier.run(steps, save)?);
    for snap in &history {
        log::info!(
            "step = {:>6}  time = {:6.4}  |div| = {:4.2e}  Nu = {:5.3e}  Nuv = {:5.3e}  Re = {:5.3e}",
            snap.step,
            snap.time,
            divergence_norm(&grid, &snap.fields),
            eval_nu(&grid, &snap.fields),
            eval_nuvol(&grid, &snap.fields, params.ka),
            eval_re(&grid, &snap.fields, params.nu),
        );
    }
    match err {
        Some(e) => {
            log::warn!("kept {} snapshots before the run stopped", history.len());
            Err(e)
        }
        None => Ok(()),
    }
}
