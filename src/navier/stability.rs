//! # Time step control
//!
//! Explicit Euler with central differences is only stable for
//! small enough time steps. Before each step the admissible size is
//! $$
//! \delta t = \min \left( C \frac{h}{\max(|u|, |w|, \epsilon)},
//!     C\\_d \frac{h^2}{\max(\nu, \kappa)}, \delta t\\_{max} \right)
//! $$
//! with $h = \min(dx, dy)$.
use crate::config::RbcConfig;
use crate::error::{RbcError, Result};
use crate::field::{max_abs, Grid};
use ndarray::Array2;

/// CFL-type stability limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cfl {
    /// Advective Courant number
    pub courant: f64,
    /// Diffusive Courant number
    pub courant_diff: f64,
    /// Velocity floor, avoids division by zero at rest
    pub vel_floor: f64,
    /// Ceiling of the time step
    pub dt_max: f64,
}

impl Default for Cfl {
    fn default() -> Self {
        Self::from_config(&RbcConfig::default())
    }
}

impl Cfl {
    /// Limits from config
    pub fn from_config(config: &RbcConfig) -> Self {
        Self {
            courant: config.courant,
            courant_diff: config.courant_diff,
            vel_floor: config.vel_floor,
            dt_max: config.dt_max,
        }
    }

    /// Advective limit for maximum velocity `umax`
    pub fn advective_limit(&self, grid: &Grid, umax: f64) -> f64 {
        self.courant * grid.hmin() / umax.max(self.vel_floor)
    }

    /// Diffusive limit
    pub fn diffusive_limit(&self, grid: &Grid, nu: f64, ka: f64) -> f64 {
        self.courant_diff * grid.hmin().powi(2) / nu.max(ka)
    }

    /// Admissible time step.
    ///
    /// # Errors
    /// `NumericalDivergence` if velocities or diffusivities are not
    /// finite. Step and time of the error are left zero, the caller
    /// fills them in with [`RbcError::at`].
    pub fn timestep(
        &self,
        grid: &Grid,
        ux: &Array2<f64>,
        uy: &Array2<f64>,
        nu: f64,
        ka: f64,
    ) -> Result<f64> {
        let (umax_x, umax_y) = (max_abs(ux), max_abs(uy));
        if !(umax_x.is_finite() && umax_y.is_finite()) {
            return Err(RbcError::divergence(0, 0., "velocity is not finite"));
        }
        let umax = umax_x.max(umax_y);
        if !nu.is_finite() || !ka.is_finite() {
            return Err(RbcError::divergence(
                0,
                0.,
                format!("diffusivities are not finite (nu = {}, ka = {})", nu, ka),
            ));
        }
        let dt = self
            .advective_limit(grid, umax)
            .min(self.diffusive_limit(grid, nu, ka))
            .min(self.dt_max);
        if !(dt.is_finite() && dt > 0.) {
            return Err(RbcError::divergence(0, 0., format!("time step is degenerate ({})", dt)));
        }
        Ok(dt)
    }
}
