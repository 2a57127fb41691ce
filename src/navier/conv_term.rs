//! # Finite difference stencils
//!
//! Second order central differences on the uniform grid,
//! periodic in x. Field-wide versions fill interior rows only,
//! wall rows are left zero.
use crate::field::Grid;
use ndarray::Array2;

/// Central difference d/dx at (j, i), periodic
#[inline]
pub fn ddx_at(grid: &Grid, f: &Array2<f64>, j: usize, i: usize) -> f64 {
    (f[[j, grid.east(i)]] - f[[j, grid.west(i)]]) / (2. * grid.dx())
}

/// Central difference d/dy at (j, i), requires 0 < j < ny - 1
#[inline]
pub fn ddy_at(grid: &Grid, f: &Array2<f64>, j: usize, i: usize) -> f64 {
    (f[[j + 1, i]] - f[[j - 1, i]]) / (2. * grid.dy())
}

/// 5-point laplacian at (j, i), requires 0 < j < ny - 1
#[inline]
pub fn laplacian_at(grid: &Grid, f: &Array2<f64>, j: usize, i: usize) -> f64 {
    let fc = f[[j, i]];
    (f[[j, grid.east(i)]] - 2. * fc + f[[j, grid.west(i)]]) / grid.dx().powi(2)
        + (f[[j + 1, i]] - 2. * fc + f[[j - 1, i]]) / grid.dy().powi(2)
}

/// Direction of a first derivative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Periodic direction
    X,
    /// Wall-normal direction
    Y,
}

/// Calculate gradient
///
/// # Input
///
///   *deriv*: Direction of the partial derivative
pub fn gradient(grid: &Grid, f: &Array2<f64>, deriv: Direction) -> Array2<f64> {
    let stencil: fn(&Grid, &Array2<f64>, usize, usize) -> f64 = match deriv {
        Direction::X => ddx_at,
        Direction::Y => ddy_at,
    };
    interior(grid, |j, i| stencil(grid, f, j, i))
}

/// Calculate laplacian of field
pub fn laplacian(grid: &Grid, f: &Array2<f64>) -> Array2<f64> {
    interior(grid, |j, i| laplacian_at(grid, f, j, i))
}

/// Calculate u*dfdx + w*dfdy
///
/// # Input
///
///    *f*: Advected field
///
///    *ux, uy*: Velocity components
///
/// # Return
/// Array of the convective term
pub fn conv_term(grid: &Grid, f: &Array2<f64>, ux: &Array2<f64>, uy: &Array2<f64>) -> Array2<f64> {
    interior(grid, |j, i| {
        ux[[j, i]] * ddx_at(grid, f, j, i) + uy[[j, i]] * ddy_at(grid, f, j, i)
    })
}

/// Evaluate pointwise function on interior rows, wrap last column
fn interior<F: Fn(usize, usize) -> f64>(grid: &Grid, fun: F) -> Array2<f64> {
    let mut out = grid.zeros();
    let m = grid.period();
    for j in 1..grid.ny() - 1 {
        for i in 0..m {
            out[[j, i]] = fun(j, i);
        }
        out[[j, m]] = out[[j, 0]];
    }
    out
}
