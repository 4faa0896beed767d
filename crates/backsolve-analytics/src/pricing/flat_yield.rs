//! Flat annual yield discounting (Actual/365, annual compounding).

use backsolve_core::types::{CashFlowSchedule, ConventionParameters, ACT_365_FIXED};

use super::DiscountModel;
use crate::error::AnalyticsResult;

/// Discounts every cash flow at one annually-compounded rate.
///
/// ```text
/// DF_i = 1 / (1 + irr)^((dates[i] - dates[0]) / 365)
/// PV   = Σ CF_i × DF_i   (− accrued interest when clean)
/// ```
///
/// The discount factors are independent of each other and measured from the
/// first cash flow date, so the first cash flow is taken at face value.
#[derive(Debug, Clone, Copy)]
pub struct FlatYieldModel<'a> {
    schedule: &'a CashFlowSchedule,
    conventions: ConventionParameters,
}

impl<'a> FlatYieldModel<'a> {
    /// Creates the model. The year convention is always Actual/365; any
    /// other value in `conventions` is replaced.
    pub fn new(
        schedule: &'a CashFlowSchedule,
        conventions: ConventionParameters,
    ) -> AnalyticsResult<Self> {
        let conventions = conventions.with_year_convention(ACT_365_FIXED);
        conventions.validate()?;
        Ok(Self {
            schedule,
            conventions,
        })
    }
}

impl DiscountModel for FlatYieldModel<'_> {
    fn present_value(&self, irr: f64) -> f64 {
        let orig_date = self.schedule.first_date();
        let mut pv = 0.0;

        for cf in self.schedule.iter() {
            let discount_factor = 1.0 / (1.0 + irr).powf((cf.date - orig_date) / ACT_365_FIXED);
            pv += cf.amount * discount_factor;
        }

        if self.conventions.is_clean {
            pv -= self.conventions.accrued_interest;
        }
        pv
    }

    fn name(&self) -> &'static str {
        "Flat IRR (ACT/365, annual)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_anchored_at_first_date() {
        // Shifting every date by the same amount leaves the value unchanged
        let a = CashFlowSchedule::new(&[-100.0, 60.0, 60.0], &[10.0, 375.0, 740.0]).unwrap();
        let b = CashFlowSchedule::new(&[-100.0, 60.0, 60.0], &[100.0, 465.0, 830.0]).unwrap();
        let conv = ConventionParameters::default();

        let pv_a = FlatYieldModel::new(&a, conv).unwrap().present_value(0.08);
        let pv_b = FlatYieldModel::new(&b, conv).unwrap().present_value(0.08);

        assert_relative_eq!(pv_a, pv_b, epsilon = 1e-12);
    }

    #[test]
    fn test_one_year_discount() {
        let schedule = CashFlowSchedule::new(&[-100.0, 112.0], &[30.0, 395.0]).unwrap();
        let model = FlatYieldModel::new(&schedule, ConventionParameters::default()).unwrap();

        assert_relative_eq!(model.present_value(0.12), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ignores_year_convention() {
        let schedule = CashFlowSchedule::new(&[-100.0, 112.0], &[30.0, 395.0]).unwrap();
        let act360 = ConventionParameters::default().with_year_convention(360.0);

        let a = FlatYieldModel::new(&schedule, act360).unwrap().present_value(0.05);
        let b = FlatYieldModel::new(&schedule, ConventionParameters::default())
            .unwrap()
            .present_value(0.05);

        assert_eq!(a, b);
    }

    #[test]
    fn test_clean_subtracts_accrued() {
        let schedule = CashFlowSchedule::new(&[-100.0, 112.0], &[30.0, 395.0]).unwrap();
        let conv = ConventionParameters::default().with_clean(2.0);
        let model = FlatYieldModel::new(&schedule, conv).unwrap();

        assert_relative_eq!(model.present_value(0.12), -2.0, epsilon = 1e-10);
    }
}
