//! Present value of a cash flow schedule.
//!
//! Two discounting conventions, each a [`DiscountModel`] over a validated
//! [`CashFlowSchedule`]:
//!
//! - [`CurveSpreadModel`]: period-by-period chained discounting at
//!   `reference rate + spread`, simple interest within each period
//! - [`FlatYieldModel`]: a single annually-compounded rate, Actual/365,
//!   anchored at the first cash flow date
//!
//! The models are pure: the same inputs always give the same value.
//!
//! # Usage
//!
//! ```rust
//! use backsolve_analytics::pricing::{present_value, present_value_for_irr};
//!
//! // Price at a 150bp spread over a 4% curve
//! let pv = present_value(&[5.0, 105.0], &[182.0, 365.0], &[0.04, 0.04], false, 0.0, 365.0, 0.015)
//!     .unwrap();
//! assert!(pv < 110.0);
//!
//! // The first cash flow is never discounted under the flat-IRR convention
//! let npv = present_value_for_irr(&[-100.0, 110.0], &[1.0, 366.0], false, 0.0, 0.10).unwrap();
//! assert!(npv.abs() < 1e-12);
//! ```

mod curve_spread;
mod flat_yield;

pub use curve_spread::CurveSpreadModel;
pub use flat_yield::FlatYieldModel;

use backsolve_core::types::{CashFlowSchedule, ConventionParameters, ReferenceRates, ACT_365_FIXED};

use crate::error::AnalyticsResult;

/// A present value as a function of one rate parameter.
///
/// The rate is the spread for [`CurveSpreadModel`] and the yield for
/// [`FlatYieldModel`].
pub trait DiscountModel {
    /// Returns the present value of the model's cash flows at `rate`.
    fn present_value(&self, rate: f64) -> f64;

    /// Returns the name of the convention.
    fn name(&self) -> &'static str;
}

/// Prices a schedule at a spread over per-period reference rates.
///
/// Slice-level entry point: validates the inputs the same way the backsolve
/// does, then evaluates [`CurveSpreadModel`].
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty schedule, mismatched lengths,
/// invalid dates, or an unusable year convention.
#[allow(clippy::too_many_arguments)]
pub fn present_value(
    cash_flows: &[f64],
    dates: &[f64],
    reference_rates: &[f64],
    is_clean: bool,
    accrued_interest: f64,
    year_convention: f64,
    spread: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::new(cash_flows, dates)?;
    let rates = ReferenceRates::for_schedule(reference_rates, &schedule)?;
    let conventions = ConventionParameters::new(is_clean, accrued_interest, year_convention);
    let model = CurveSpreadModel::new(&schedule, &rates, conventions)?;
    Ok(model.present_value(spread))
}

/// Prices a schedule at a flat annual yield (Actual/365).
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty schedule, mismatched lengths or
/// invalid dates.
pub fn present_value_for_irr(
    cash_flows: &[f64],
    dates: &[f64],
    is_clean: bool,
    accrued_interest: f64,
    irr: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::new(cash_flows, dates)?;
    let conventions = ConventionParameters::new(is_clean, accrued_interest, ACT_365_FIXED);
    let model = FlatYieldModel::new(&schedule, conventions)?;
    Ok(model.present_value(irr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;

    #[test]
    fn test_empty_schedule_is_invalid_argument() {
        let err = present_value(&[], &[], &[], false, 0.0, 365.0, 0.01).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));

        let err = present_value_for_irr(&[], &[], false, 0.0, 0.05).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    }

    #[test]
    fn test_rates_length_mismatch() {
        let err = present_value(&[5.0, 105.0], &[182.0, 365.0], &[0.04], false, 0.0, 365.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_year_convention_rejected() {
        let err = present_value(&[105.0], &[365.0], &[0.04], false, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    }
}
