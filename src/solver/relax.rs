//! Relaxation sweeps for the discrete Poisson equation
//!
//! Interior update of the 5-point stencil
//! $$
//! \psi\\_{j,i} = \frac{c\\_x (\psi\\_{j,i+1} + \psi\\_{j,i-1})
//!     + c\\_y (\psi\\_{j+1,i} + \psi\\_{j-1,i}) + \omega\\_{j,i}}{2 c\\_x + 2 c\\_y}
//! $$
//! with $c\\_x = 1/dx^2$, $c\\_y = 1/dy^2$.
use crate::boundary::{apply_periodic, apply_zero_walls};
use crate::field::Grid;
use enum_dispatch::enum_dispatch;
use ndarray::Array2;

/// One relaxation sweep over all interior points.
///
/// Boundary values (psi = 0 at the walls, periodic in x) are
/// re-applied at the end of every sweep.
#[enum_dispatch]
pub trait Relax {
    /// Sweep once, updating `psi` in place
    fn sweep(&mut self, grid: &Grid, vort: &Array2<f64>, psi: &mut Array2<f64>);
}

/// Collection of relaxation schemes
#[enum_dispatch(Relax)]
#[derive(Debug, Clone)]
pub enum Relaxation {
    /// In-place Gauss-Seidel
    GaussSeidel(GaussSeidel),
    /// Double-buffered Jacobi
    Jacobi(Jacobi),
}

/// Lexicographic Gauss-Seidel, new values are used as soon
/// as they are available
#[derive(Debug, Clone, Default)]
pub struct GaussSeidel;

impl Relax for GaussSeidel {
    fn sweep(&mut self, grid: &Grid, vort: &Array2<f64>, psi: &mut Array2<f64>) {
        let (cx, cy, inv) = coefficients(grid);
        for j in 1..grid.ny() - 1 {
            for i in 0..grid.period() {
                let (w, e) = (grid.west(i), grid.east(i));
                psi[[j, i]] = (cx * (psi[[j, e]] + psi[[j, w]])
                    + cy * (psi[[j + 1, i]] + psi[[j - 1, i]])
                    + vort[[j, i]])
                    * inv;
            }
        }
        apply_zero_walls(psi);
        apply_periodic(grid, psi);
    }
}

/// Jacobi iteration, reads only values of the previous sweep
#[derive(Debug, Clone)]
pub struct Jacobi {
    buffer: Array2<f64>,
}

impl Jacobi {
    /// Allocate buffer for grid
    pub fn new(grid: &Grid) -> Self {
        Self {
            buffer: grid.zeros(),
        }
    }
}

impl Relax for Jacobi {
    fn sweep(&mut self, grid: &Grid, vort: &Array2<f64>, psi: &mut Array2<f64>) {
        if self.buffer.dim() != psi.dim() {
            self.buffer = Array2::zeros(psi.dim());
        }
        let (cx, cy, inv) = coefficients(grid);
        for j in 1..grid.ny() - 1 {
            for i in 0..grid.period() {
                let (w, e) = (grid.west(i), grid.east(i));
                self.buffer[[j, i]] = (cx * (psi[[j, e]] + psi[[j, w]])
                    + cy * (psi[[j + 1, i]] + psi[[j - 1, i]])
                    + vort[[j, i]])
                    * inv;
            }
        }
        apply_zero_walls(&mut self.buffer);
        apply_periodic(grid, &mut self.buffer);
        std::mem::swap(psi, &mut self.buffer);
    }
}

/// Returns (1/dx^2, 1/dy^2, 1/(2/dx^2 + 2/dy^2))
fn coefficients(grid: &Grid) -> (f64, f64, f64) {
    let cx = 1. / grid.dx().powi(2);
    let cy = 1. / grid.dy().powi(2);
    (cx, cy, 1. / (2. * cx + 2. * cy))
}
