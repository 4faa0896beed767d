//! Tagged solve outcomes.

use serde::Serialize;
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// How a backsolve ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// The residual met the tolerance at this rate.
    Converged(f64),
    /// The residual stopped changing between iterates; no root can be
    /// located from here.
    Diverged,
    /// The iteration budget was exhausted.
    NotConverged,
}

impl SolveOutcome {
    /// Returns the solved rate, if converged.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Converged(value) => Some(*value),
            Self::Diverged | Self::NotConverged => None,
        }
    }

    /// Returns true if the solve converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged(value) => write!(f, "converged ({value})"),
            Self::Diverged => write!(f, "diverged"),
            Self::NotConverged => write!(f, "not converged"),
        }
    }
}

/// Outcome of a backsolve together with iteration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolveReport {
    /// How the solve ended.
    pub outcome: SolveOutcome,
    /// Number of secant updates performed.
    pub iterations: u32,
    /// Last iterate: the root when converged, the flat point when diverged.
    /// `None` when the budget ran out.
    pub last_rate: Option<f64>,
    /// Absolute residual at the last iterate.
    pub residual: f64,
}

impl SolveReport {
    /// Converts the report into the rate, or the matching error kind.
    ///
    /// # Errors
    ///
    /// `Diverged` and `NotConverged` outcomes become the error variants of
    /// the same name.
    pub fn into_result(self) -> AnalyticsResult<f64> {
        match self.outcome {
            SolveOutcome::Converged(value) => Ok(value),
            SolveOutcome::Diverged => Err(AnalyticsError::Diverged {
                iterations: self.iterations,
                rate: self.last_rate.unwrap_or(f64::NAN),
            }),
            SolveOutcome::NotConverged => Err(AnalyticsError::NotConverged {
                iterations: self.iterations,
                residual: self.residual,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_value() {
        assert_eq!(SolveOutcome::Converged(0.015).value(), Some(0.015));
        assert_eq!(SolveOutcome::Diverged.value(), None);
        assert!(!SolveOutcome::NotConverged.is_converged());
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_string(&SolveOutcome::Converged(0.5)).unwrap();
        assert_eq!(json, r#"{"status":"converged","value":0.5}"#);

        let json = serde_json::to_string(&SolveOutcome::Diverged).unwrap();
        assert_eq!(json, r#"{"status":"diverged"}"#);
    }

    #[test]
    fn test_report_into_result() {
        let report = SolveReport {
            outcome: SolveOutcome::NotConverged,
            iterations: 1,
            last_rate: None,
            residual: 0.25,
        };
        assert_eq!(
            report.into_result(),
            Err(AnalyticsError::NotConverged {
                iterations: 1,
                residual: 0.25
            })
        );

        let report = SolveReport {
            outcome: SolveOutcome::Converged(0.02),
            iterations: 4,
            last_rate: Some(0.02),
            residual: 1e-12,
        };
        assert_eq!(report.into_result(), Ok(0.02));
    }
}
