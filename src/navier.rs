//! # Rayleigh-Benard convection
//!
//! Finite difference discretization of the Boussinesq equations in
//! vorticity - stream function form, periodic in x and bounded by
//! two isothermal no-slip plates in y.
pub mod conv_term;
pub mod functions;
#[allow(clippy::module_inception)]
pub mod navier;
pub mod stability;
pub mod transport;
pub mod velocity;
pub use conv_term::{conv_term, Direction};
pub use navier::{Navier2D, Parameters, Run};
pub use stability::Cfl;
