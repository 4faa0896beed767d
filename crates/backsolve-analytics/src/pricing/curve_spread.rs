//! Chained discounting at a spread over a reference curve.

use backsolve_core::types::{CashFlowSchedule, ConventionParameters, ReferenceRates};

use super::DiscountModel;
use crate::error::AnalyticsResult;

/// Discounts a schedule period by period at `reference rate + spread`.
///
/// For cash flow `i` with period length `dates[i] - dates[i-1]` (the first
/// period starts at 0):
///
/// ```text
/// DF_i = DF_{i-1} / (1 + (ref_i + s) × (dates[i] - dates[i-1]) / year_convention)
/// PV   = Σ CF_i × DF_i   (− accrued interest when clean)
/// ```
///
/// Each discount factor is the product of every preceding period's factor,
/// so the reference rate can differ per period.
#[derive(Debug, Clone, Copy)]
pub struct CurveSpreadModel<'a> {
    schedule: &'a CashFlowSchedule,
    rates: &'a ReferenceRates,
    conventions: ConventionParameters,
}

impl<'a> CurveSpreadModel<'a> {
    /// Creates the model, checking one reference rate per cash flow.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a rate count mismatch or invalid
    /// conventions.
    pub fn new(
        schedule: &'a CashFlowSchedule,
        rates: &'a ReferenceRates,
        conventions: ConventionParameters,
    ) -> AnalyticsResult<Self> {
        rates.check_length(schedule)?;
        conventions.validate()?;
        Ok(Self {
            schedule,
            rates,
            conventions,
        })
    }

    /// Returns the pricing conventions.
    #[must_use]
    pub fn conventions(&self) -> &ConventionParameters {
        &self.conventions
    }
}

impl DiscountModel for CurveSpreadModel<'_> {
    fn present_value(&self, spread: f64) -> f64 {
        let year_convention = self.conventions.year_convention;
        let mut discount_factor = 1.0;
        let mut prev_date = 0.0;
        let mut pv = 0.0;

        let flows = self.schedule.amounts().iter().zip(self.schedule.dates());
        for ((&amount, &date), &reference) in flows.zip(self.rates.as_slice()) {
            let rate = reference + spread;
            discount_factor /= 1.0 + rate * (date - prev_date) / year_convention;
            pv += amount * discount_factor;
            prev_date = date;
        }

        if self.conventions.is_clean {
            pv -= self.conventions.accrued_interest;
        }
        pv
    }

    fn name(&self) -> &'static str {
        "Curve + spread (chained)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model_fixture() -> (CashFlowSchedule, ReferenceRates) {
        let schedule = CashFlowSchedule::new(&[5.0, 105.0], &[180.0, 360.0]).unwrap();
        let rates = ReferenceRates::new(&[0.04, 0.05]).unwrap();
        (schedule, rates)
    }

    #[test]
    fn test_chained_discount_factors() {
        let (schedule, rates) = model_fixture();
        let conv = ConventionParameters::default().with_year_convention(360.0);
        let model = CurveSpreadModel::new(&schedule, &rates, conv).unwrap();

        // Half-year periods at 4%+1% then 5%+1%
        let df1 = 1.0 / (1.0 + 0.05 * 0.5);
        let df2 = df1 / (1.0 + 0.06 * 0.5);
        let expected = 5.0 * df1 + 105.0 * df2;

        assert_relative_eq!(model.present_value(0.01), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_undiscounted_sum() {
        let schedule = CashFlowSchedule::new(&[5.0, 105.0], &[180.0, 360.0]).unwrap();
        let rates = ReferenceRates::flat(0.0, 2).unwrap();
        let model =
            CurveSpreadModel::new(&schedule, &rates, ConventionParameters::default()).unwrap();

        assert_eq!(model.present_value(0.0), 110.0);
    }

    #[test]
    fn test_clean_subtracts_accrued() {
        let (schedule, rates) = model_fixture();
        let dirty =
            CurveSpreadModel::new(&schedule, &rates, ConventionParameters::default()).unwrap();
        let clean = CurveSpreadModel::new(
            &schedule,
            &rates,
            ConventionParameters::default().with_clean(1.75),
        )
        .unwrap();

        assert_relative_eq!(
            dirty.present_value(0.02) - clean.present_value(0.02),
            1.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_pv_decreases_with_spread() {
        let (schedule, rates) = model_fixture();
        let model =
            CurveSpreadModel::new(&schedule, &rates, ConventionParameters::default()).unwrap();

        assert!(model.present_value(0.01) > model.present_value(0.02));
    }

    #[test]
    fn test_rate_count_mismatch() {
        let (schedule, _) = model_fixture();
        let rates = ReferenceRates::new(&[0.04]).unwrap();

        assert!(CurveSpreadModel::new(&schedule, &rates, ConventionParameters::default()).is_err());
    }
}
