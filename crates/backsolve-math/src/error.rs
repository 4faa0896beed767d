//! Error types for root finding.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The last two residuals were identical, so the secant step would
    /// divide by zero.
    #[error("value doesn't change when the rate is sensitized: residual {residual:.2e} at {root} after {iterations} iterations")]
    Diverged {
        /// Number of completed updates before the flat step.
        iterations: u32,
        /// Last iterate.
        root: f64,
        /// Residual at the last iterate.
        residual: f64,
    },

    /// Root-finding algorithm failed to converge within its budget.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid solver input.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a divergence error.
    #[must_use]
    pub fn diverged(iterations: u32, root: f64, residual: f64) -> Self {
        Self::Diverged {
            iterations,
            root,
            residual,
        }
    }

    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
