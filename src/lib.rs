#![warn(missing_docs)]
//! # rustrbc: Rayleigh-Benard convection with finite differences
//!
//! This library solves the two-dimensional Boussinesq equations in a
//! layer of fluid heated from below. The flow is described by
//! temperature, vorticity and stream function on a uniform grid,
//! periodic in x and bounded by two isothermal no-slip plates in y.
//!
//! One time step consists of
//! - choosing a stable step size from the CFL conditions,
//! - explicit transport of temperature and vorticity,
//! - a relaxation solve for the stream function,
//! - the velocity reconstruction and the boundary conditions.
//!
//! # Example
//! ```
//! use rustrbc::{integrate, Navier2D};
//! let mut navier = Navier2D::new(33, 17, 2.0, 1.0, 5e3, 1.0).unwrap();
//! let steps = integrate(&mut navier, 0.01, None).unwrap();
//! assert_eq!(steps, navier.step());
//! ```
pub mod boundary;
pub mod config;
pub mod error;
pub mod field;
pub mod integrate;
pub mod navier;
pub mod solver;
pub use config::{RbcConfig, RelaxationKind, Scaling};
pub use error::{RbcError, Result};
pub use field::{FieldState, Grid};
pub use integrate::{integrate, History, Integrate, Snapshot};
pub use navier::Navier2D;
