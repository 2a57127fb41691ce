//! # Boundary conditions
//!
//! x is periodic: column `nx - 1` is a copy of column `0`.
//!
//! y is bounded by two no-slip walls:
//! - bottom (`j = 0`): T = 1, u = w = 0, psi = 0
//! - top (`j = ny - 1`): T = 0, u = w = 0, psi = 0
//!
//! Wall vorticity follows from the stream function with Thom's formula
//! $$
//! \omega\\_{wall} = -2 (\psi\\_{1} - \psi\\_{0}) / dy^2
//! $$
use crate::field::{FieldState, Grid};
use ndarray::{s, Array2};

/// Temperature of the bottom plate
pub const T_BOTTOM: f64 = 1.0;
/// Temperature of the top plate
pub const T_TOP: f64 = 0.0;

/// Apply all boundary conditions in place.
///
/// `psi` must come from the stream function solver, the wall vorticity
/// is derived from it.
pub fn apply_boundary(grid: &Grid, state: &mut FieldState) {
    for v in [
        &mut state.temp,
        &mut state.vort,
        &mut state.psi,
        &mut state.ux,
        &mut state.uy,
    ] {
        apply_periodic(grid, v);
    }
    apply_wall_temperature(&mut state.temp);
    apply_zero_walls(&mut state.psi);
    apply_no_slip(&mut state.ux, &mut state.uy);
    apply_wall_vorticity(grid, &state.psi, &mut state.vort);
}

/// Copy column 0 into the identified column `nx - 1`
pub fn apply_periodic(grid: &Grid, v: &mut Array2<f64>) {
    let m = grid.period();
    for mut row in v.outer_iter_mut() {
        row[m] = row[0];
    }
}

/// Fixed plate temperatures
pub fn apply_wall_temperature(temp: &mut Array2<f64>) {
    let n = temp.nrows();
    temp.row_mut(0).fill(T_BOTTOM);
    temp.row_mut(n - 1).fill(T_TOP);
}

/// Homogeneous dirichlet at both walls
pub fn apply_zero_walls(v: &mut Array2<f64>) {
    let n = v.nrows();
    v.row_mut(0).fill(0.);
    v.row_mut(n - 1).fill(0.);
}

/// No-slip: both velocity components vanish at the walls
pub fn apply_no_slip(ux: &mut Array2<f64>, uy: &mut Array2<f64>) {
    apply_zero_walls(ux);
    apply_zero_walls(uy);
}

/// Wall vorticity from the stream function (Thom's formula)
pub fn apply_wall_vorticity(grid: &Grid, psi: &Array2<f64>, vort: &mut Array2<f64>) {
    let n = grid.ny();
    let c = -2. / grid.dy().powi(2);
    let bottom = (&psi.row(1) - &psi.row(0)) * c;
    let top = (&psi.row(n - 2) - &psi.row(n - 1)) * c;
    vort.slice_mut(s![0, ..]).assign(&bottom);
    vort.slice_mut(s![n - 1, ..]).assign(&top);
}
