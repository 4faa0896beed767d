//! Spread and IRR backsolving.
//!
//! [`BacksolveService`] validates a schedule, builds the matching
//! [`DiscountModel`] and runs a secant iteration on
//! `target - present_value(rate)`, seeded at 6.00% and 6.25%.
//!
//! # Usage
//!
//! ```rust
//! use backsolve_analytics::{backsolve_spread, backsolve_yield};
//!
//! // Spread over a flat 4% curve that prices 5/105 at 102
//! let spread = backsolve_spread(
//!     &[5.0, 105.0], &[182.0, 365.0], &[0.04, 0.04],
//!     102.0, 1e-10, 100, false, 0.0, 365.0,
//! ).unwrap();
//! assert!(spread > 0.0);
//!
//! // IRR of paying 100 today-ish and receiving 110 a year later
//! let irr = backsolve_yield(&[-100.0, 110.0], &[1.0, 366.0], 1e-10, 100, false, 0.0).unwrap();
//! assert!((irr - 0.10).abs() < 1e-9);
//! ```

use tracing::debug;

use backsolve_core::types::{CashFlowSchedule, ConventionParameters, ReferenceRates, ACT_365_FIXED};
use backsolve_math::solvers::{RootFinder, SecantSolver, SolverConfig};
use backsolve_math::MathError;

use crate::error::AnalyticsResult;
use crate::outcome::{SolveOutcome, SolveReport};
use crate::pricing::{CurveSpreadModel, DiscountModel, FlatYieldModel};

/// First secant seed (6%). The second seed is 25bp above it.
pub const INITIAL_GUESS: f64 = 0.06;

/// Backsolves spreads and yields for cash flow schedules.
///
/// The service holds only configuration; every solve builds its own state
/// and shares nothing with other calls.
///
/// # Example
///
/// ```rust
/// use backsolve_analytics::{BacksolveService, SolveOutcome};
/// use backsolve_core::ConventionParameters;
///
/// let service = BacksolveService::default().with_max_iterations(50);
/// let outcome = service
///     .solve_yield(&[-100.0, 110.0], &[1.0, 366.0], ConventionParameters::default())
///     .unwrap();
///
/// assert!(matches!(outcome, SolveOutcome::Converged(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacksolveService {
    config: SolverConfig,
    solver: SecantSolver,
}

impl Default for BacksolveService {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl BacksolveService {
    /// Creates a service with the given solver configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            solver: SecantSolver::default(),
        }
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the spread over `reference_rates` that prices the cash
    /// flows at `target_price`.
    ///
    /// `target_price` is a currency amount, not a percentage of par.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the arrays are empty or of different
    /// lengths, or the dates are not strictly increasing from a positive
    /// start. Divergence and non-convergence are reported in the outcome.
    pub fn solve_spread(
        &self,
        cash_flows: &[f64],
        dates: &[f64],
        reference_rates: &[f64],
        target_price: f64,
        conventions: ConventionParameters,
    ) -> AnalyticsResult<SolveOutcome> {
        let schedule = CashFlowSchedule::new(cash_flows, dates)?;
        let rates = ReferenceRates::for_schedule(reference_rates, &schedule)?;
        self.solve_spread_report(&schedule, &rates, target_price, conventions)
            .map(|report| report.outcome)
    }

    /// Solves for the flat annual IRR that prices the cash flows at zero.
    ///
    /// The year convention in `conventions` is ignored (Actual/365).
    ///
    /// # Errors
    ///
    /// Same validation as [`solve_spread`](Self::solve_spread).
    pub fn solve_yield(
        &self,
        cash_flows: &[f64],
        dates: &[f64],
        conventions: ConventionParameters,
    ) -> AnalyticsResult<SolveOutcome> {
        let schedule = CashFlowSchedule::new(cash_flows, dates)?;
        self.solve_yield_report(&schedule, conventions)
            .map(|report| report.outcome)
    }

    /// Spread solve over an already validated schedule, with diagnostics.
    pub fn solve_spread_report(
        &self,
        schedule: &CashFlowSchedule,
        rates: &ReferenceRates,
        target_price: f64,
        conventions: ConventionParameters,
    ) -> AnalyticsResult<SolveReport> {
        let model = CurveSpreadModel::new(schedule, rates, conventions)?;
        self.backsolve(&model, target_price, schedule.len())
    }

    /// Yield solve over an already validated schedule, with diagnostics.
    pub fn solve_yield_report(
        &self,
        schedule: &CashFlowSchedule,
        conventions: ConventionParameters,
    ) -> AnalyticsResult<SolveReport> {
        let model = FlatYieldModel::new(schedule, conventions)?;
        self.backsolve(&model, 0.0, schedule.len())
    }

    /// Runs the secant iteration on `target - model.present_value(rate)`.
    fn backsolve<M: DiscountModel>(
        &self,
        model: &M,
        target: f64,
        cash_flows: usize,
    ) -> AnalyticsResult<SolveReport> {
        debug!(
            model = model.name(),
            cash_flows,
            target,
            tolerance = self.config.tolerance,
            max_iterations = self.config.max_iterations,
            "starting backsolve"
        );

        let objective = |rate: f64| target - model.present_value(rate);
        let report = match self.solver.solve(objective, INITIAL_GUESS, &self.config) {
            Ok(result) => SolveReport {
                outcome: SolveOutcome::Converged(result.root),
                iterations: result.iterations,
                last_rate: Some(result.root),
                residual: result.residual.abs(),
            },
            Err(MathError::Diverged {
                iterations,
                root,
                residual,
            }) => SolveReport {
                outcome: SolveOutcome::Diverged,
                iterations,
                last_rate: Some(root),
                residual: residual.abs(),
            },
            Err(MathError::ConvergenceFailed {
                iterations,
                residual,
            }) => SolveReport {
                outcome: SolveOutcome::NotConverged,
                iterations,
                last_rate: None,
                residual,
            },
            Err(err @ MathError::InvalidInput { .. }) => return Err(err.into()),
        };

        debug!(
            model = model.name(),
            outcome = %report.outcome,
            iterations = report.iterations,
            "backsolve finished"
        );
        Ok(report)
    }
}

/// Backsolves the spread over a reference curve; the rate or a typed error.
///
/// # Errors
///
/// - `InvalidArgument`: empty or mismatched arrays, invalid dates
/// - `AllocationFailure`: working buffers could not be reserved
/// - `Diverged`: the present value stopped responding to the spread
/// - `NotConverged`: `max_iterations` was exhausted
#[allow(clippy::too_many_arguments)]
pub fn backsolve_spread(
    cash_flows: &[f64],
    dates: &[f64],
    reference_rates: &[f64],
    target_price: f64,
    tolerance: f64,
    max_iterations: u32,
    is_clean: bool,
    accrued_interest: f64,
    year_convention: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::new(cash_flows, dates)?;
    let rates = ReferenceRates::for_schedule(reference_rates, &schedule)?;
    let conventions = ConventionParameters::new(is_clean, accrued_interest, year_convention);

    BacksolveService::new(SolverConfig::new(tolerance, max_iterations))
        .solve_spread_report(&schedule, &rates, target_price, conventions)?
        .into_result()
}

/// Backsolves the flat annual IRR; the rate or a typed error.
///
/// # Errors
///
/// Same error kinds as [`backsolve_spread`].
pub fn backsolve_yield(
    cash_flows: &[f64],
    dates: &[f64],
    tolerance: f64,
    max_iterations: u32,
    is_clean: bool,
    accrued_interest: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::new(cash_flows, dates)?;
    let conventions = ConventionParameters::new(is_clean, accrued_interest, ACT_365_FIXED);

    BacksolveService::new(SolverConfig::new(tolerance, max_iterations))
        .solve_yield_report(&schedule, conventions)?
        .into_result()
}
