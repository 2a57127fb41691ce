//! # Direct numerical simulation
//! Solver for 2-dimensional Boussinesq equations in
//! vorticity - stream function form.
//!
//! # Example
//! Solve 2-D Rayleigh Benard Convection
//! ```
//! use rustrbc::navier::Navier2D;
//! use rustrbc::History;
//!
//! // Parameters
//! let (nx, ny) = (33, 17);
//! let (lx, ly) = (2.0, 1.0);
//! let ra = 5e3;
//! let pr = 1.;
//! let mut navier = Navier2D::new(nx, ny, lx, ly, ra, pr).unwrap();
//! // Keep every 10th step
//! let (history, err) = History::collect(navier.run(50, 10).unwrap());
//! assert!(err.is_none());
//! assert_eq!(history.len(), 6);
//! ```
use super::functions::{divergence_norm, eval_nu, eval_nuvol, eval_re};
use super::stability::Cfl;
use super::transport::Transport;
use super::velocity::reconstruct_velocity;
use crate::boundary::apply_boundary;
use crate::config::{RbcConfig, Scaling};
use crate::error::{RbcError, Result};
use crate::field::{FieldState, Grid};
use crate::integrate::{Integrate, Snapshot};
use crate::solver::Poisson;
use ndarray::Array2;
use std::iter::FusedIterator;

/// Return viscosity from Ra, Pr, and height of the cell (free-fall units)
pub fn get_nu(ra: f64, pr: f64, height: f64) -> f64 {
    let f = pr / (ra / height.powf(3.0));
    f.sqrt()
}

/// Return diffusivity from Ra, Pr, and height of the cell (free-fall units)
pub fn get_ka(ra: f64, pr: f64, height: f64) -> f64 {
    let f = 1. / ((ra / height.powf(3.0)) * pr);
    f.sqrt()
}

/// Physical parameters of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Rayleigh number
    pub ra: f64,
    /// Prandtl number
    pub pr: f64,
    /// Nondimensionalization
    pub scaling: Scaling,
    /// Viscosity
    pub nu: f64,
    /// Thermal diffusivity
    pub ka: f64,
    /// Coefficient of dT/dx in the vorticity equation
    pub buoyancy: f64,
}

impl Parameters {
    /// Derive diffusivities and buoyancy from Ra and Pr
    pub fn new(ra: f64, pr: f64, scaling: Scaling, height: f64) -> Self {
        let (nu, ka, buoyancy) = match scaling {
            Scaling::Diffusive => (pr, 1., ra * pr),
            Scaling::FreeFall => (get_nu(ra, pr, height), get_ka(ra, pr, height), 1.),
        };
        Self {
            ra,
            pr,
            scaling,
            nu,
            ka,
            buoyancy,
        }
    }
}

/// Solve 2-dimensional Navier-Stokes equations
/// coupled with temperature equations
///
/// Struct must be mutable, to perform the
/// update step, which advances the solution
/// by 1 timestep.
///
/// Each step runs, in this order:
/// 1. time step control
/// 2. transport of temperature and vorticity
/// 3. stream function solve
/// 4. velocity reconstruction
/// 5. boundary conditions
#[derive(Debug, Clone)]
pub struct Navier2D {
    grid: Grid,
    params: Parameters,
    cfl: Cfl,
    poisson: Poisson,
    transport: Transport,
    fields: FieldState,
    time: f64,
    dt: f64,
    step: usize,
}

impl Navier2D {
    /// Default settings on the given domain
    ///
    /// # Arguments
    ///
    /// * `nx,ny` - Grid points in x and y -direction
    ///
    /// * `lx,ly` - Length and height of the domain
    ///
    /// * `ra,pr` - Rayleigh and Prandtl number
    ///
    /// # Errors
    /// `InvalidConfiguration` for too small grids or non-positive
    /// lengths, Ra or Pr.
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64, ra: f64, pr: f64) -> Result<Self> {
        Self::from_config(&RbcConfig::new(nx, ny, lx, ly, ra, pr))
    }

    /// Construct from full settings. The temperature starts from
    /// the conductive profile plus the configured perturbation.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `config` does not validate.
    pub fn from_config(config: &RbcConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.nx, config.ny, config.lx, config.ly)?;
        let params = Parameters::new(config.ra, config.pr, config.scaling, config.ly);
        log::info!(
            "Navier2D {}x{}: Ra = {:e}, Pr = {}, nu = {:.4e}, kappa = {:.4e}",
            config.nx,
            config.ny,
            params.ra,
            params.pr,
            params.nu,
            params.ka,
        );
        let poisson = Poisson::new(&grid, config.relaxation, config.poisson_iter);
        let transport = Transport::new(&grid);
        let fields = FieldState::conduction(&grid);
        let mut navier = Self {
            cfl: Cfl::from_config(config),
            grid,
            params,
            poisson,
            transport,
            fields,
            time: 0.,
            dt: 0.,
            step: 0,
        };
        navier.set_temperature(config.perturbation, config.mode);
        Ok(navier)
    }

    /// Advance the solution by one time step.
    ///
    /// Returns the time step taken.
    ///
    /// # Errors
    /// `NumericalDivergence` if a field is not finite, either on entry or
    /// after the update. The state must be discarded in that case.
    pub fn advance_one_step(&mut self) -> Result<f64> {
        if let Some(name) = self.fields.first_non_finite() {
            return Err(self.diverged(format!("{} is not finite", name)));
        }
        let dt = self
            .cfl
            .timestep(
                &self.grid,
                &self.fields.ux,
                &self.fields.uy,
                self.params.nu,
                self.params.ka,
            )
            .map_err(|e| e.at(self.step, self.time))?;

        self.transport
            .step(&self.grid, &self.params, &mut self.fields, dt);
        self.poisson
            .solve(&self.grid, &self.fields.vort, &mut self.fields.psi);
        reconstruct_velocity(
            &self.grid,
            &self.fields.psi,
            &mut self.fields.ux,
            &mut self.fields.uy,
        );
        apply_boundary(&self.grid, &mut self.fields);

        self.time += dt;
        self.dt = dt;
        self.step += 1;
        if let Some(name) = self.fields.first_non_finite() {
            return Err(self.diverged(format!("{} became non-finite", name)));
        }
        log::trace!("step {:>6}  t = {:.5e}  dt = {:.3e}", self.step, self.time, dt);
        Ok(dt)
    }

    fn diverged(&self, reason: String) -> RbcError {
        log::warn!("step {}: {}", self.step, reason);
        RbcError::divergence(self.step, self.time, reason)
    }

    /// Advance `total_steps` steps lazily.
    ///
    /// The returned iterator yields the initial state and then a snapshot
    /// after every `save_interval`-th step. It stops after the first
    /// error.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `save_interval` is zero.
    pub fn run(&mut self, total_steps: usize, save_interval: usize) -> Result<Run<'_>> {
        if save_interval == 0 {
            return Err(RbcError::invalid("save_interval must be at least 1"));
        }
        Ok(Run {
            navier: self,
            total_steps,
            save_interval,
            done: 0,
            started: false,
            finished: false,
        })
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            step: self.step,
            fields: self.fields.clone(),
        }
    }

    /// Initialize temperature as conduction profile plus
    /// perturbation
    ///
    /// temp = 1 - y/ly + amp \* sin(2 pi m x/lx) sin(pi y/ly)
    ///
    /// `m` should be an integer to fit the periodic domain.
    pub fn set_temperature(&mut self, amp: f64, m: f64) {
        use std::f64::consts::PI;
        let arg_x = 2. * PI * m / self.grid.lx();
        let arg_y = PI / self.grid.ly();
        let ly = self.grid.ly();
        for (j, y) in self.grid.y().iter().enumerate() {
            for (i, x) in self.grid.x().iter().enumerate() {
                self.fields.temp[[j, i]] = 1. - y / ly + amp * (arg_x * x).sin() * (arg_y * y).sin();
            }
        }
        apply_boundary(&self.grid, &mut self.fields);
    }

    /// Add random disturbance \[-amp, amp\] to the temperature
    ///
    /// # Errors
    /// `InvalidConfiguration` if `amp` is not finite.
    pub fn random_disturbance(&mut self, amp: f64) -> Result<()> {
        use ndarray_rand::rand_distr::Uniform;
        use ndarray_rand::RandomExt;
        if !amp.is_finite() {
            return Err(RbcError::invalid(format!(
                "disturbance amplitude must be finite, got {}",
                amp
            )));
        }
        let amp = amp.abs();
        if amp == 0. {
            return Ok(());
        }
        let rand: Array2<f64> = Array2::random(self.grid.shape(), Uniform::new(-amp, amp));
        self.fields.temp += &rand;
        apply_boundary(&self.grid, &mut self.fields);
        Ok(())
    }

    /// Reset time and step counter
    pub fn reset_time(&mut self) {
        self.time = 0.;
        self.step = 0;
    }

    /// Grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Physical parameters
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Stability limits
    pub fn cfl(&self) -> &Cfl {
        &self.cfl
    }

    /// All fields
    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    /// Mutable access to the fields, e.g. to impose an initial state.
    ///
    /// Boundary conditions are re-applied by the next step.
    pub fn fields_mut(&mut self) -> &mut FieldState {
        &mut self.fields
    }

    /// Temperature
    pub fn temp(&self) -> &Array2<f64> {
        &self.fields.temp
    }

    /// Vorticity
    pub fn vort(&self) -> &Array2<f64> {
        &self.fields.vort
    }

    /// Stream function
    pub fn psi(&self) -> &Array2<f64> {
        &self.fields.psi
    }

    /// Horizontal velocity
    pub fn ux(&self) -> &Array2<f64> {
        &self.fields.ux
    }

    /// Vertical velocity
    pub fn uy(&self) -> &Array2<f64> {
        &self.fields.uy
    }

    /// Simulation time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Last time step taken (zero before the first step)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps taken
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Integrate for Navier2D {
    /// Update 1 timestep
    fn update(&mut self) -> Result<f64> {
        self.advance_one_step()
    }

    fn get_time(&self) -> f64 {
        self.time
    }

    fn get_dt(&self) -> f64 {
        self.dt
    }

    /// Log global quantities
    fn callback(&mut self) {
        let div = divergence_norm(&self.grid, &self.fields);
        let nu = eval_nu(&self.grid, &self.fields);
        let nuvol = eval_nuvol(&self.grid, &self.fields, self.params.ka);
        let re = eval_re(&self.grid, &self.fields, self.params.nu);
        log::info!(
            "time = {:4.2}      |div| = {:4.2e}     Nu = {:5.3e}     Nuv = {:5.3e}    Re = {:5.3e}",
            self.time,
            div,
            nu,
            nuvol,
            re
        );
    }

    /// Break if any field is nan
    fn exit(&mut self) -> bool {
        self.fields.first_non_finite().is_some()
    }
}

/// Lazy sequence of snapshots, see [`Navier2D::run`]
#[derive(Debug)]
pub struct Run<'a> {
    navier: &'a mut Navier2D,
    total_steps: usize,
    save_interval: usize,
    done: usize,
    started: bool,
    finished: bool,
}

impl Run<'_> {
    /// Steps advanced so far
    pub fn steps_done(&self) -> usize {
        self.done
    }
}

impl Iterator for Run<'_> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if let Some(name) = self.navier.fields.first_non_finite() {
                self.finished = true;
                return Some(Err(self.navier.diverged(format!("{} is not finite", name))));
            }
            return Some(Ok(self.navier.snapshot()));
        }
        while self.done < self.total_steps {
            if let Err(e) = self.navier.advance_one_step() {
                self.finished = true;
                return Some(Err(e));
            }
            self.done += 1;
            if self.done % self.save_interval == 0 {
                return Some(Ok(self.navier.snapshot()));
            }
        }
        self.finished = true;
        None
    }
}

impl FusedIterator for Run<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::max_abs;
    use crate::integrate::History;
    use crate::navier::functions::rms_velocity;

    fn assert_boundary(navier: &Navier2D) {
        let grid = navier.grid();
        let (ny, nx) = grid.shape();
        let f = navier.fields();
        for i in 0..nx {
            assert_eq!(f.temp[[0, i]], 1.);
            assert_eq!(f.temp[[ny - 1, i]], 0.);
            for v in [&f.ux, &f.uy] {
                assert_eq!(v[[0, i]], 0.);
                assert_eq!(v[[ny - 1, i]], 0.);
            }
        }
        for v in [&f.temp, &f.vort, &f.psi, &f.ux, &f.uy] {
            for j in 0..ny {
                assert_eq!(v[[j, 0]], v[[j, nx - 1]]);
            }
        }
    }

    #[test]
    fn test_invalid_construction() {
        for result in [
            Navier2D::new(2, 9, 1., 1., 1e3, 1.),
            Navier2D::new(9, 9, 0., 1., 1e3, 1.),
            Navier2D::new(9, 9, 1., 1., 0., 1.),
            Navier2D::new(9, 9, 1., 1., 1e3, -1.),
        ] {
            match result {
                Err(RbcError::InvalidConfiguration(_)) => (),
                other => panic!("expected InvalidConfiguration, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_parameters() {
        let p = Parameters::new(1e4, 0.7, Scaling::Diffusive, 1.);
        assert_eq!((p.nu, p.ka, p.buoyancy), (0.7, 1., 7e3));
        let p = Parameters::new(1e4, 1., Scaling::FreeFall, 1.);
        assert!((p.nu - 1e-2).abs() < 1e-14);
        assert!((p.ka - 1e-2).abs() < 1e-14);
        assert_eq!(p.buoyancy, 1.);
    }

    #[test]
    fn test_boundary_every_step() {
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        assert_boundary(&navier);
        let mut time = 0.;
        for step in 1..=20 {
            let dt = navier.advance_one_step().unwrap();
            assert!(dt > 0.);
            assert!(navier.time() > time);
            assert_eq!(navier.step(), step);
            time = navier.time();
            assert_boundary(&navier);
        }
    }

    #[test]
    fn test_subcritical_rest() {
        // Below onset, without perturbation, the fluid stays at rest
        let config = RbcConfig {
            nx: 17,
            ny: 9,
            lx: 2.,
            ly: 1.,
            ra: 1e3,
            perturbation: 0.,
            ..RbcConfig::default()
        };
        let mut navier = Navier2D::from_config(&config).unwrap();
        for _ in 0..500 {
            navier.advance_one_step().unwrap();
            assert!(max_abs(navier.ux()) < 1e-6);
            assert!(max_abs(navier.uy()) < 1e-6);
        }
        // linear profile
        let grid = navier.grid().clone();
        for (j, y) in grid.y().iter().enumerate() {
            for i in 0..grid.nx() {
                assert!((navier.temp()[[j, i]] - (1. - y)).abs() < 1e-6);
            }
        }
    }

    /// rms velocity after each of the given steps
    fn rms_at(ra: f64, steps: &[usize]) -> Vec<f64> {
        let config = RbcConfig {
            nx: 41,
            ny: 21,
            lx: 2.,
            ly: 1.,
            ra,
            ..RbcConfig::default()
        };
        let mut navier = Navier2D::from_config(&config).unwrap();
        let mut rms = Vec::new();
        for &target in steps {
            while navier.step() < target {
                navier.advance_one_step().unwrap();
            }
            rms.push(rms_velocity(navier.grid(), navier.fields()));
        }
        rms
    }

    #[test]
    fn test_supercritical_growth() {
        let rms = rms_at(5e3, &[200, 300, 400]);
        assert!(rms[0] < rms[1] && rms[1] < rms[2], "no growth: {:?}", rms);
        assert!(rms[2] > 2. * rms[0], "no growth: {:?}", rms);
    }

    #[test]
    fn test_subcritical_decay() {
        let rms = rms_at(1e3, &[200, 300, 400]);
        assert!(rms[0] > 0.);
        assert!(rms[0] > rms[1] && rms[1] > rms[2], "no decay: {:?}", rms);
        assert!(rms[2] < 0.5 * rms[0], "no decay: {:?}", rms);
    }

    #[test]
    fn test_jacobi_relaxation() {
        use crate::config::RelaxationKind;
        let config = RbcConfig {
            nx: 17,
            ny: 9,
            relaxation: RelaxationKind::Jacobi,
            ..RbcConfig::default()
        };
        let mut navier = Navier2D::from_config(&config).unwrap();
        for _ in 0..10 {
            navier.advance_one_step().unwrap();
        }
        assert_boundary(&navier);
    }

    #[test]
    fn test_nan_is_divergence() {
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        navier.advance_one_step().unwrap();
        navier.fields_mut().temp[[4, 4]] = f64::NAN;
        match navier.advance_one_step() {
            Err(RbcError::NumericalDivergence { step, .. }) => assert_eq!(step, 1),
            other => panic!("expected NumericalDivergence, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_not_in_history() {
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        navier.fields_mut().vort[[3, 3]] = f64::INFINITY;
        let (history, err) = History::collect(navier.run(10, 1).unwrap());
        assert!(history.is_empty());
        assert!(err.unwrap().is_divergence());
    }

    #[test]
    fn test_run() {
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        let snapshots: Vec<Snapshot> = navier
            .run(10, 3)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let steps: Vec<usize> = snapshots.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 3, 6, 9]);
        assert!(snapshots.windows(2).all(|w| w[0].time < w[1].time));
        // all requested steps are taken, even past the last save
        assert_eq!(navier.step(), 10);
        assert!(navier.run(10, 0).is_err());
    }

    #[test]
    fn test_integrate() {
        use crate::integrate::integrate;
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        let steps = integrate(&mut navier, 0.05, Some(0.01)).unwrap();
        assert_eq!(steps, navier.step());
        assert!(navier.time() + navier.dt() * 1e-4 >= 0.05);
        assert!(navier.time() < 0.05 + navier.dt());
    }

    #[test]
    fn test_random_disturbance() {
        let mut navier = Navier2D::new(17, 9, 2., 1., 5e3, 1.).unwrap();
        let before = navier.temp().clone();
        navier.random_disturbance(0.).unwrap();
        assert_eq!(navier.temp(), &before);
        navier.random_disturbance(1e-2).unwrap();
        assert!(navier.temp() != &before);
        assert!(max_abs(&(navier.temp() - &before)) <= 1e-2);
        assert_boundary(&navier);
        for amp in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match navier.random_disturbance(amp) {
                Err(RbcError::InvalidConfiguration(_)) => (),
                other => panic!("expected InvalidConfiguration, got {:?}", other),
            }
        }
        assert!(navier.fields().first_non_finite().is_none());
    }

    #[test]
    fn test_run_is_fused() {
        let mut navier = Navier2D::new(9, 5, 1., 1., 5e3, 1.).unwrap();
        let mut run = navier.run(2, 1).unwrap();
        assert_eq!(run.by_ref().count(), 3);
        assert_eq!(run.steps_done(), 2);
        assert!(run.next().is_none());
    }
}
