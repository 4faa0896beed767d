//! CLI error types.

use thiserror::Error;

use backsolve_analytics::AnalyticsError;
use backsolve_core::BacksolveError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Schedule file extension is neither `.csv` nor `.json`.
    #[error("Unsupported schedule file: {0}. Use a .csv or .json file.")]
    UnsupportedSchedule(String),

    /// Schedule rows are inconsistent.
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schedule failed validation.
    #[error(transparent)]
    Validation(#[from] BacksolveError),

    /// Pricing or backsolve failure.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
