//! # Backsolve Analytics
//!
//! Spread and IRR backsolving over dated cash flows.
//!
//! - **Pricing**: Present value under a chained curve-plus-spread convention
//!   or a flat annual IRR convention
//! - **Service**: `solve_spread` / `solve_yield` with tagged outcomes
//!
//! ## Architecture
//!
//! Data flows one way:
//!
//! ```text
//! caller -> BacksolveService -> secant solver -> DiscountModel -> rate or error
//! ```
//!
//! Every solve is a pure computation over its own inputs; the crate holds no
//! global or cached state.
//!
//! ## Usage
//!
//! ```rust
//! use backsolve_analytics::prelude::*;
//!
//! let service = BacksolveService::default().with_tolerance(1e-8);
//! let outcome = service
//!     .solve_spread(
//!         &[5.0, 105.0],
//!         &[182.0, 365.0],
//!         &[0.04, 0.045],
//!         101.0,
//!         ConventionParameters::default(),
//!     )
//!     .unwrap();
//!
//! match outcome {
//!     SolveOutcome::Converged(spread) => println!("spread: {:.2} bps", spread * 10_000.0),
//!     SolveOutcome::Diverged => println!("price does not respond to the spread"),
//!     SolveOutcome::NotConverged => println!("raise max_iterations"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod outcome;
pub mod pricing;
pub mod service;

pub use error::{AnalyticsError, AnalyticsResult};
pub use outcome::{SolveOutcome, SolveReport};
pub use service::{backsolve_spread, backsolve_yield, BacksolveService};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::outcome::{SolveOutcome, SolveReport};
    pub use crate::pricing::{
        present_value, present_value_for_irr, CurveSpreadModel, DiscountModel, FlatYieldModel,
    };
    pub use crate::service::{backsolve_spread, backsolve_yield, BacksolveService};

    pub use backsolve_core::prelude::*;
    pub use backsolve_math::solvers::SolverConfig;
}
