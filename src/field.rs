//! # Grid and field storage
//!
//! A [`Grid`] holds the uniform spacing of the domain
//! `[0, lx] x [0, ly]`. x is periodic, y is bounded by walls.
//! A [`FieldState`] owns the flow variables on that grid.
//!
//! All arrays have shape `(ny, nx)` and are indexed by `[[j, i]]`
//! (row = y, column = x). Columns `0` and `nx - 1` denote the same
//! physical point of the periodic direction, so only `nx - 1` columns are
//! independent.
pub mod average;
use crate::error::{RbcError, Result};
use ndarray::prelude::*;
use ndarray::{Data, Dimension};
use num_traits::Float;

/// Uniform two dimensional grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    lx: f64,
    ly: f64,
    dx: f64,
    dy: f64,
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Grid {
    /// Return new grid with `nx * ny` points on `[0, lx] x [0, ly]`
    ///
    /// # Errors
    /// `InvalidConfiguration` if `nx < 3`, `ny < 3` or the lengths
    /// are not positive.
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self> {
        if nx < 3 || ny < 3 {
            return Err(RbcError::invalid(format!(
                "grid needs at least 3 points per direction, got ({}, {})",
                nx, ny
            )));
        }
        if !(lx.is_finite() && lx > 0. && ly.is_finite() && ly > 0.) {
            return Err(RbcError::invalid(format!(
                "domain lengths must be positive, got ({}, {})",
                lx, ly
            )));
        }
        Ok(Self {
            nx,
            ny,
            lx,
            ly,
            dx: lx / (nx - 1) as f64,
            dy: ly / (ny - 1) as f64,
            x: Array1::linspace(0., lx, nx),
            y: Array1::linspace(0., ly, ny),
        })
    }

    /// Points in x
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Points in y
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Domain length
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Domain height
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Grid spacing in x
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Grid spacing in y
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Smallest grid spacing
    pub fn hmin(&self) -> f64 {
        self.dx.min(self.dy)
    }

    /// Coordinates in x
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Coordinates in y
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Array shape `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Number of independent columns of the periodic direction
    pub fn period(&self) -> usize {
        self.nx - 1
    }

    /// Periodic west neighbour of column `i`
    #[inline]
    pub fn west(&self, i: usize) -> usize {
        let m = self.period();
        (i + m - 1) % m
    }

    /// Periodic east neighbour of column `i`
    #[inline]
    pub fn east(&self, i: usize) -> usize {
        (i + 1) % self.period()
    }

    /// Zero array of grid shape
    pub fn zeros(&self) -> Array2<f64> {
        Array2::zeros(self.shape())
    }
}

/// Flow variables on a [`Grid`]
///
/// `ux` and `uy` are derived from `psi` and never integrated
/// on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    /// Temperature
    pub temp: Array2<f64>,
    /// Vorticity
    pub vort: Array2<f64>,
    /// Stream function
    pub psi: Array2<f64>,
    /// Horizontal velocity
    pub ux: Array2<f64>,
    /// Vertical velocity
    pub uy: Array2<f64>,
}

impl FieldState {
    /// All fields zero
    pub fn zeros(grid: &Grid) -> Self {
        Self {
            temp: grid.zeros(),
            vort: grid.zeros(),
            psi: grid.zeros(),
            ux: grid.zeros(),
            uy: grid.zeros(),
        }
    }

    /// Pure conduction: linear temperature from T = 1 (bottom)
    /// to T = 0 (top), fluid at rest
    pub fn conduction(grid: &Grid) -> Self {
        let mut state = Self::zeros(grid);
        for (mut row, y) in state.temp.outer_iter_mut().zip(grid.y().iter()) {
            row.fill(1. - y / grid.ly());
        }
        state
    }

    /// Shape shared by all fields
    pub fn shape(&self) -> (usize, usize) {
        self.temp.dim()
    }

    /// Name of the first field holding a NaN or infinite value
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.named()
            .iter()
            .find(|(_, v)| !all_finite(*v))
            .map(|(name, _)| *name)
    }

    fn named(&self) -> [(&'static str, &Array2<f64>); 5] {
        [
            ("temp", &self.temp),
            ("vort", &self.vort),
            ("psi", &self.psi),
            ("ux", &self.ux),
            ("uy", &self.uy),
        ]
    }
}

/// Maximum of absolute values. NaN is propagated.
pub fn max_abs<A, S, D>(array: &ArrayBase<S, D>) -> A
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().fold(A::zero(), |m, &x| {
        if x.is_nan() || m.is_nan() {
            A::nan()
        } else {
            m.max(x.abs())
        }
    })
}

/// Euclidian norm
pub fn norm_l2<A, S, D>(array: &ArrayBase<S, D>) -> A
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().fold(A::zero(), |s, &x| s + x * x).sqrt()
}

/// True if no entry is NaN or infinite
pub fn all_finite<A, S, D>(array: &ArrayBase<S, D>) -> bool
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid() {
        let grid = Grid::new(5, 3, 2.0, 1.0).unwrap();
        assert_eq!(grid.shape(), (3, 5));
        assert!((grid.dx() - 0.5).abs() < 1e-14);
        assert!((grid.dy() - 0.5).abs() < 1e-14);
        assert!((grid.x()[4] - 2.0).abs() < 1e-14);
        assert_eq!(grid.period(), 4);
        assert_eq!(grid.west(0), 3);
        assert_eq!(grid.east(3), 0);
        assert_eq!(grid.east(1), 2);
    }

    #[test]
    fn test_grid_invalid() {
        assert!(Grid::new(2, 5, 1.0, 1.0).is_err());
        assert!(Grid::new(5, 2, 1.0, 1.0).is_err());
        assert!(Grid::new(5, 5, 0.0, 1.0).is_err());
        assert!(Grid::new(5, 5, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_conduction() {
        let grid = Grid::new(6, 5, 1.0, 1.0).unwrap();
        let state = FieldState::conduction(&grid);
        for i in 0..6 {
            assert!((state.temp[[0, i]] - 1.0).abs() < 1e-14);
            assert!((state.temp[[2, i]] - 0.5).abs() < 1e-14);
            assert!(state.temp[[4, i]].abs() < 1e-14);
        }
        assert_eq!(max_abs(&state.vort), 0.);
        assert!(state.first_non_finite().is_none());
    }

    #[test]
    fn test_non_finite() {
        let grid = Grid::new(4, 4, 1.0, 1.0).unwrap();
        let mut state = FieldState::zeros(&grid);
        state.psi[[1, 1]] = f64::INFINITY;
        state.uy[[2, 2]] = f64::NAN;
        assert_eq!(state.first_non_finite(), Some("psi"));
        assert!(max_abs(&state.uy).is_nan());
        assert!(!all_finite(&state.uy));
    }

    #[test]
    fn test_norm() {
        let a = array![[3., -4.], [0., 0.]];
        assert!((norm_l2(&a) - 5.).abs() < 1e-14);
        assert!((max_abs(&a) - 4.).abs() < 1e-14);
    }
}
