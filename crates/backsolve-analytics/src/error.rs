//! Error types for the analytics layer.
//!
//! Lower-layer errors from `backsolve-core` and `backsolve-math` convert
//! into [`AnalyticsError`] so callers see a single error kind per failure.

use thiserror::Error;

use backsolve_core::BacksolveError;
use backsolve_math::MathError;

/// Error type for pricing and backsolve operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Empty or mismatched arrays, non-monotonic/non-positive dates, or an
    /// unusable solver configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A working buffer could not be reserved.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// The last two residuals were identical: the present value does not
    /// respond to the rate over the explored range.
    #[error("value doesn't change when yield is sensitized (after {iterations} iterations at rate {rate})")]
    Diverged {
        /// Number of updates completed before the flat step.
        iterations: u32,
        /// Last rate tried.
        rate: f64,
    },

    /// The iteration budget ran out before the tolerance was met.
    #[error("failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    NotConverged {
        /// Number of updates performed.
        iterations: u32,
        /// Absolute residual at the last iterate.
        residual: f64,
    },
}

impl AnalyticsError {
    /// Returns true if raising the iteration budget may help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotConverged { .. })
    }
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl From<BacksolveError> for AnalyticsError {
    fn from(err: BacksolveError) -> Self {
        match err {
            BacksolveError::InvalidArgument { reason } => AnalyticsError::InvalidArgument(reason),
            BacksolveError::AllocationFailure { reason } => {
                AnalyticsError::AllocationFailure(reason)
            }
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Diverged {
                iterations, root, ..
            } => AnalyticsError::Diverged {
                iterations,
                rate: root,
            },
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => AnalyticsError::NotConverged {
                iterations,
                residual,
            },
            MathError::InvalidInput { reason } => AnalyticsError::InvalidArgument(reason),
        }
    }
}
