//! # Explicit transport step
//!
//! Temperature and vorticity equations, advanced with forward Euler
//! $$
//! T\\_{new} = T + \delta t \left( -(u \partial\\_x T + w \partial\\_y T) + \kappa \nabla^2 T \right)
//! $$
//! $$
//! \omega\\_{new} = \omega + \delta t \left( -(u \partial\\_x \omega + w \partial\\_y \omega)
//!     + \nu \nabla^2 \omega + b \partial\\_x T \right)
//! $$
//! where b is the buoyancy coefficient. All spatial terms are central
//! differences, there is no upwinding.
use super::conv_term::{ddx_at, ddy_at, laplacian_at};
use super::navier::Parameters;
use crate::boundary::apply_periodic;
use crate::field::{FieldState, Grid};
use ndarray::Array2;

/// Double buffers of the transport step
#[derive(Debug, Clone)]
pub struct Transport {
    temp_new: Array2<f64>,
    vort_new: Array2<f64>,
}

impl Transport {
    /// Allocate buffers for grid
    pub fn new(grid: &Grid) -> Self {
        Self {
            temp_new: grid.zeros(),
            vort_new: grid.zeros(),
        }
    }

    /// Advance temperature and vorticity by `dt`.
    ///
    /// Every stencil reads from the fields of the previous step, results
    /// go to the buffers which are swapped in at the end. Wall rows are
    /// carried over unchanged.
    pub fn step(&mut self, grid: &Grid, params: &Parameters, state: &mut FieldState, dt: f64) {
        self.temp_new.assign(&state.temp);
        self.vort_new.assign(&state.vort);
        {
            let temp = &state.temp;
            let vort = &state.vort;
            for j in 1..grid.ny() - 1 {
                for i in 0..grid.period() {
                    let ux = state.ux[[j, i]];
                    let uy = state.uy[[j, i]];
                    let dtdx = ddx_at(grid, temp, j, i);
                    let conv_temp = ux * dtdx + uy * ddy_at(grid, temp, j, i);
                    let conv_vort = ux * ddx_at(grid, vort, j, i) + uy * ddy_at(grid, vort, j, i);
                    self.temp_new[[j, i]] = temp[[j, i]]
                        + dt * (-conv_temp + params.ka * laplacian_at(grid, temp, j, i));
                    self.vort_new[[j, i]] = vort[[j, i]]
                        + dt * (-conv_vort
                            + params.nu * laplacian_at(grid, vort, j, i)
                            + params.buoyancy * dtdx);
                }
            }
        }
        apply_periodic(grid, &mut self.temp_new);
        apply_periodic(grid, &mut self.vort_new);
        std::mem::swap(&mut state.temp, &mut self.temp_new);
        std::mem::swap(&mut state.vort, &mut self.vort_new);
    }
}
