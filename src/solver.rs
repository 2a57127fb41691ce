//! # Stream function solver
//!
//! Iterative solution of
//! $$
//! \nabla^2 \psi = -\omega
//! $$
//! with relaxation sweeps over the 5-point stencil.
pub mod poisson;
pub mod relax;
pub use poisson::Poisson;
pub use relax::{GaussSeidel, Jacobi, Relax, Relaxation};
