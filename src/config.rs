//! # Simulation settings
//!
//! All knobs of a run live in one plain struct, [`RbcConfig`]. It is
//! validated once when a [`crate::Navier2D`] is constructed and never
//! changed afterwards.
//!
//! ```
//! use rustrbc::RbcConfig;
//! let config = RbcConfig {
//!     nx: 65,
//!     ny: 33,
//!     lx: 2.0,
//!     ra: 1e4,
//!     ..RbcConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
use crate::error::{RbcError, Result};
use serde::{Deserialize, Serialize};

/// Nondimensionalization of the Boussinesq equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    /// Thermal diffusion units: nu = Pr, kappa = 1, buoyancy = Ra Pr
    Diffusive,
    /// Free-fall units: nu = sqrt(Pr/Ra), kappa = sqrt(1/(Ra Pr)), buoyancy = 1
    FreeFall,
}

/// Relaxation scheme of the stream function solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelaxationKind {
    /// In-place lexicographic sweeps
    GaussSeidel,
    /// Double-buffered sweeps
    Jacobi,
}

/// Settings of a Rayleigh-Benard run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbcConfig {
    /// Grid points in x (periodic)
    pub nx: usize,
    /// Grid points in y (wall to wall)
    pub ny: usize,
    /// Domain length
    pub lx: f64,
    /// Domain height
    pub ly: f64,
    /// Rayleigh number
    pub ra: f64,
    /// Prandtl number
    pub pr: f64,
    /// Nondimensionalization
    pub scaling: Scaling,
    /// Advective Courant number, in (0, 1)
    pub courant: f64,
    /// Diffusive Courant number, in (0, 0.5)
    pub courant_diff: f64,
    /// Velocity floor of the advective limit
    pub vel_floor: f64,
    /// Upper bound of the time step
    pub dt_max: f64,
    /// Relaxation sweeps per stream function solve
    pub poisson_iter: usize,
    /// Relaxation scheme
    pub relaxation: RelaxationKind,
    /// Amplitude of the initial temperature perturbation
    pub perturbation: f64,
    /// Horizontal wavenumber of the initial perturbation
    pub mode: f64,
}

impl Default for RbcConfig {
    fn default() -> Self {
        Self {
            nx: 65,
            ny: 33,
            lx: 2.0,
            ly: 1.0,
            ra: 5e3,
            pr: 1.0,
            scaling: Scaling::Diffusive,
            courant: 0.5,
            courant_diff: 0.2,
            vel_floor: 1e-10,
            dt_max: 1e-2,
            poisson_iter: 100,
            relaxation: RelaxationKind::GaussSeidel,
            perturbation: 1e-2,
            mode: 1.0,
        }
    }
}

impl RbcConfig {
    /// Default settings for a given grid and physical parameters
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64, ra: f64, pr: f64) -> Self {
        Self {
            nx,
            ny,
            lx,
            ly,
            ra,
            pr,
            ..Self::default()
        }
    }

    /// Check all settings.
    ///
    /// # Errors
    /// [`RbcError::InvalidConfiguration`] naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.nx < 3 {
            return Err(RbcError::invalid(format!("nx must be >= 3, got {}", self.nx)));
        }
        if self.ny < 3 {
            return Err(RbcError::invalid(format!("ny must be >= 3, got {}", self.ny)));
        }
        positive("lx", self.lx)?;
        positive("ly", self.ly)?;
        positive("ra", self.ra)?;
        positive("pr", self.pr)?;
        positive("dt_max", self.dt_max)?;
        positive("vel_floor", self.vel_floor)?;
        if !(self.courant > 0. && self.courant < 1.) {
            return Err(RbcError::invalid(format!(
                "courant must lie in (0, 1), got {}",
                self.courant
            )));
        }
        if !(self.courant_diff > 0. && self.courant_diff < 0.5) {
            return Err(RbcError::invalid(format!(
                "courant_diff must lie in (0, 0.5), got {}",
                self.courant_diff
            )));
        }
        if self.poisson_iter == 0 {
            return Err(RbcError::invalid("poisson_iter must be at least 1"));
        }
        if !self.perturbation.is_finite() || !self.mode.is_finite() {
            return Err(RbcError::invalid(format!(
                "initial perturbation must be finite, got amp = {}, mode = {}",
                self.perturbation, self.mode
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(RbcError::invalid(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RbcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_invalid() {
        let base = RbcConfig::default();
        let cases = [
            RbcConfig { nx: 2, ..base.clone() },
            RbcConfig { ny: 0, ..base.clone() },
            RbcConfig { lx: 0., ..base.clone() },
            RbcConfig { ly: -1., ..base.clone() },
            RbcConfig { ra: 0., ..base.clone() },
            RbcConfig { pr: f64::NAN, ..base.clone() },
            RbcConfig { courant: 1.0, ..base.clone() },
            RbcConfig { courant_diff: 0.5, ..base.clone() },
            RbcConfig { dt_max: 0., ..base.clone() },
            RbcConfig { vel_floor: 0., ..base.clone() },
            RbcConfig { poisson_iter: 0, ..base.clone() },
            RbcConfig { perturbation: f64::INFINITY, ..base.clone() },
        ];
        for config in cases.iter() {
            match config.validate() {
                Err(RbcError::InvalidConfiguration(_)) => (),
                other => panic!("expected InvalidConfiguration for {:?}, got {:?}", config, other),
            }
        }
    }

    #[test]
    fn test_serde() {
        let config = RbcConfig {
            ra: 2e4,
            relaxation: RelaxationKind::Jacobi,
            scaling: Scaling::FreeFall,
            ..RbcConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RbcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
        // missing keys fall back to defaults
        let partial: RbcConfig = serde_json::from_str(r#"{"nx": 17, "ra": 1000.0}"#).unwrap();
        assert_eq!(partial.nx, 17);
        assert_eq!(partial.ny, RbcConfig::default().ny);
        assert!(partial.validate().is_ok());
    }
}
