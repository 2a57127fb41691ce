//! Error types of the convection solver
use thiserror::Error;

/// Result type of *rustrbc*
pub type Result<T> = std::result::Result<T, RbcError>;

/// Errors raised while setting up or advancing a simulation.
///
/// Neither kind is recoverable: a run with an invalid configuration must be
/// rebuilt, a diverged run must be abandoned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RbcError {
    /// Grid, physical or numerical parameters out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A field or the time step became NaN or infinite.
    #[error("Numerical divergence at step {step} (t = {time:.5e}): {reason}")]
    NumericalDivergence {
        /// Step counter when the divergence was detected
        step: usize,
        /// Simulation time when the divergence was detected
        time: f64,
        /// What went non-finite
        reason: String,
    },
}

impl RbcError {
    /// Create an invalid configuration error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a divergence error.
    pub fn divergence(step: usize, time: f64, reason: impl Into<String>) -> Self {
        Self::NumericalDivergence {
            step,
            time,
            reason: reason.into(),
        }
    }

    /// Attach step and time to a divergence error
    pub fn at(self, step: usize, time: f64) -> Self {
        match self {
            Self::NumericalDivergence { reason, .. } => Self::NumericalDivergence { step, time, reason },
            other => other,
        }
    }

    /// True for [`RbcError::NumericalDivergence`]
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::NumericalDivergence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RbcError::invalid("nx must be >= 3, got 2");
        assert_eq!(err.to_string(), "Invalid configuration: nx must be >= 3, got 2");
        let err = RbcError::divergence(12, 0.5, "temp");
        assert!(err.is_divergence());
        assert!(err.to_string().contains("step 12"));
        assert!(err.to_string().ends_with("temp"));
        let err = RbcError::divergence(0, 0., "ux").at(7, 1.5);
        assert_eq!(
            err,
            RbcError::NumericalDivergence {
                step: 7,
                time: 1.5,
                reason: "ux".to_string()
            }
        );
    }
}
