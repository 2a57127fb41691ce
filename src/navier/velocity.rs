//! Velocity from stream function
//! $$
//! u = \partial\\_y \psi, \quad w = -\partial\\_x \psi
//! $$
use super::conv_term::{ddx_at, ddy_at};
use crate::boundary::{apply_no_slip, apply_periodic};
use crate::field::Grid;
use ndarray::Array2;

/// Reconstruct `ux` and `uy` from `psi` with central differences.
///
/// Wall rows are set to zero (no-slip). Rows next to a wall read the
/// wall value `psi = 0`, so the central stencil there equals the
/// one-sided difference consistent with the wall condition, and the
/// discrete divergence vanishes.
pub fn reconstruct_velocity(
    grid: &Grid,
    psi: &Array2<f64>,
    ux: &mut Array2<f64>,
    uy: &mut Array2<f64>,
) {
    for j in 1..grid.ny() - 1 {
        for i in 0..grid.period() {
            ux[[j, i]] = ddy_at(grid, psi, j, i);
            uy[[j, i]] = -ddx_at(grid, psi, j, i);
        }
    }
    apply_periodic(grid, ux);
    apply_periodic(grid, uy);
    apply_no_slip(ux, uy);
}
