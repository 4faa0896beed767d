//! # Backsolve Math
//!
//! Numerical solvers for the Backsolve cash flow solver.
//!
//! This crate provides:
//!
//! - **Solvers**: A secant root finder with exact divergence detection
//! - **Configuration**: Tolerance and iteration budgets shared by callers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{secant, RootFinder, SecantSolver, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
