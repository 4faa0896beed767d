//! # Backsolve Core
//!
//! Core types and validation for the Backsolve cash flow solver.
//!
//! This crate provides the building blocks used by the solver and the
//! analytics layer:
//!
//! - **Types**: `CashFlowSchedule`, `ReferenceRates`, `ConventionParameters`
//! - **Validation**: schedules are checked once, at construction
//! - **Errors**: `BacksolveError` for invalid inputs and allocation failures
//!
//! ## Example
//!
//! ```rust
//! use backsolve_core::prelude::*;
//!
//! let schedule = CashFlowSchedule::new(&[5.0, 105.0], &[182.0, 365.0]).unwrap();
//! let rates = ReferenceRates::for_schedule(&[0.03, 0.032], &schedule).unwrap();
//! let conv = ConventionParameters::default().with_clean(1.5);
//!
//! assert_eq!(rates.len(), schedule.len());
//! assert!(conv.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BacksolveError, BacksolveResult};
    pub use crate::types::{
        CashFlow, CashFlowSchedule, ConventionParameters, ReferenceRates, ACT_360, ACT_365_FIXED,
    };
}

// Re-export commonly used types at crate root
pub use error::{BacksolveError, BacksolveResult};
pub use types::{CashFlowSchedule, ConventionParameters, ReferenceRates};
