//! Poisson Solver
//! Solve for the stream function
//! ..math:
//!  D2 psi = -omega
//!
//! psi = 0 at the walls, periodic in x.
//!
//! The solver runs a fixed number of relaxation sweeps and
//! has no convergence criterion. Starting from the previous
//! stream function, the remaining error is carried over to
//! the next time step.
use super::relax::{GaussSeidel, Jacobi, Relax, Relaxation};
use crate::boundary::{apply_periodic, apply_zero_walls};
use crate::config::RelaxationKind;
use crate::field::{max_abs, Grid};
use ndarray::Array2;

/// Container for Poisson Solver
#[derive(Debug, Clone)]
pub struct Poisson {
    relaxation: Relaxation,
    iterations: usize,
}

impl Poisson {
    /// Construct Poisson solver
    ///
    /// # Arguments
    ///
    /// * `kind` - Relaxation scheme
    ///
    /// * `iterations` - Sweeps per solve
    pub fn new(grid: &Grid, kind: RelaxationKind, iterations: usize) -> Self {
        let relaxation: Relaxation = match kind {
            RelaxationKind::GaussSeidel => GaussSeidel.into(),
            RelaxationKind::Jacobi => Jacobi::new(grid).into(),
        };
        Self {
            relaxation,
            iterations,
        }
    }

    /// Sweeps per solve
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Update `psi` with a fixed number of sweeps. The incoming `psi`
    /// serves as initial guess.
    ///
    /// Non-finite vorticity is not guarded against, it ends up in `psi`.
    pub fn solve(&mut self, grid: &Grid, vort: &Array2<f64>, psi: &mut Array2<f64>) {
        apply_zero_walls(psi);
        apply_periodic(grid, psi);
        for _ in 0..self.iterations {
            self.relaxation.sweep(grid, vort, psi);
        }
    }

    /// Max-norm of the discrete residual `D2 psi + omega`
    /// over interior points
    pub fn residual(grid: &Grid, vort: &Array2<f64>, psi: &Array2<f64>) -> f64 {
        let cx = 1. / grid.dx().powi(2);
        let cy = 1. / grid.dy().powi(2);
        let mut res = grid.zeros();
        for j in 1..grid.ny() - 1 {
            for i in 0..grid.period() {
                let (w, e) = (grid.west(i), grid.east(i));
                res[[j, i]] = cx * (psi[[j, e]] - 2. * psi[[j, i]] + psi[[j, w]])
                    + cy * (psi[[j + 1, i]] - 2. * psi[[j, i]] + psi[[j - 1, i]])
                    + vort[[j, i]];
            }
        }
        max_abs(&res)
    }
}
