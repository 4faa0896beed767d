//! Error types for the Backsolve library.
//!
//! Input validation and buffer preparation failures are reported here,
//! before any numeric work starts.

use std::collections::TryReserveError;

use thiserror::Error;

/// A specialized Result type for Backsolve core operations.
pub type BacksolveResult<T> = Result<T, BacksolveError>;

/// The main error type for schedule construction and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BacksolveError {
    /// Empty or mismatched arrays, non-monotonic or non-positive dates,
    /// or an unusable convention parameter.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },

    /// A working buffer could not be reserved.
    #[error("Allocation failure: {reason}")]
    AllocationFailure {
        /// Which buffer failed and why.
        reason: String,
    },
}

impl BacksolveError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an allocation failure for the named buffer.
    #[must_use]
    pub fn allocation_failure(buffer: &str, err: &TryReserveError) -> Self {
        Self::AllocationFailure {
            reason: format!("failed to allocate memory for {buffer}: {err}"),
        }
    }

    /// Returns true for errors caused by caller-supplied inputs.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BacksolveError::invalid_argument("dates must be increasing");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_allocation_failure_display() {
        let err = Vec::<f64>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = BacksolveError::allocation_failure("cash flows", &err);
        assert!(err.to_string().contains("cash flows"));
        assert!(!err.is_invalid_argument());
    }
}
