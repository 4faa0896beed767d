//! Pricing conventions shared by both discounting modes.

use serde::{Deserialize, Serialize};

use crate::error::{BacksolveError, BacksolveResult};

/// Actual/365 Fixed year basis.
///
/// The flat-IRR model always uses this denominator; it is also the default
/// for the curve-spread model.
pub const ACT_365_FIXED: f64 = 365.0;

/// Actual/360 year basis, common for money-market reference rates.
pub const ACT_360: f64 = 360.0;

/// Clean/dirty treatment and day-count basis for a present value.
///
/// # Example
///
/// ```rust
/// use backsolve_core::types::ConventionParameters;
///
/// let conv = ConventionParameters::default()
///     .with_clean(1.25)
///     .with_year_convention(360.0);
///
/// assert!(conv.is_clean);
/// assert_eq!(conv.price_adjustment(), 1.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConventionParameters {
    /// Subtract accrued interest from the computed present value.
    pub is_clean: bool,
    /// Accrued interest, in the same units as the cash flows.
    pub accrued_interest: f64,
    /// Day-count denominator for the curve-spread model.
    pub year_convention: f64,
}

impl Default for ConventionParameters {
    fn default() -> Self {
        Self {
            is_clean: false,
            accrued_interest: 0.0,
            year_convention: ACT_365_FIXED,
        }
    }
}

impl ConventionParameters {
    /// Creates convention parameters.
    #[must_use]
    pub fn new(is_clean: bool, accrued_interest: f64, year_convention: f64) -> Self {
        Self {
            is_clean,
            accrued_interest,
            year_convention,
        }
    }

    /// Switches to clean pricing with the given accrued interest.
    #[must_use]
    pub fn with_clean(mut self, accrued_interest: f64) -> Self {
        self.is_clean = true;
        self.accrued_interest = accrued_interest;
        self
    }

    /// Sets the day-count denominator.
    #[must_use]
    pub fn with_year_convention(mut self, year_convention: f64) -> Self {
        self.year_convention = year_convention;
        self
    }

    /// Amount subtracted from the discounted sum: the accrued interest when
    /// clean, zero when dirty.
    #[must_use]
    pub fn price_adjustment(&self) -> f64 {
        if self.is_clean {
            self.accrued_interest
        } else {
            0.0
        }
    }

    /// Checks that the parameters can be used in a discounting loop.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the year convention is not a positive
    /// finite number, or the price is clean and the accrued interest is not
    /// finite. Dirty pricing never reads the accrued interest.
    pub fn validate(&self) -> BacksolveResult<()> {
        if !(self.year_convention.is_finite() && self.year_convention > 0.0) {
            return Err(BacksolveError::invalid_argument(format!(
                "year convention must be positive, got {}",
                self.year_convention
            )));
        }
        if self.is_clean && !self.accrued_interest.is_finite() {
            return Err(BacksolveError::invalid_argument(format!(
                "accrued interest must be finite, got {}",
                self.accrued_interest
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_dirty_act365() {
        let conv = ConventionParameters::default();
        assert!(!conv.is_clean);
        assert_eq!(conv.year_convention, ACT_365_FIXED);
        assert_eq!(conv.price_adjustment(), 0.0);
    }

    #[test]
    fn test_dirty_ignores_accrued() {
        let conv = ConventionParameters::new(false, 3.0, ACT_360);
        assert_eq!(conv.price_adjustment(), 0.0);

        // Unused when dirty, so a non-finite value is not an error
        for accrued in [f64::NAN, f64::INFINITY] {
            let conv = ConventionParameters::new(false, accrued, ACT_365_FIXED);
            assert!(conv.validate().is_ok());
            assert_eq!(conv.price_adjustment(), 0.0);
        }
    }

    #[test]
    fn test_clean_adjustment() {
        let conv = ConventionParameters::default().with_clean(0.1 + 0.2);
        assert_relative_eq!(conv.price_adjustment(), 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_validate() {
        assert!(ConventionParameters::default().validate().is_ok());
        assert!(ConventionParameters::default()
            .with_year_convention(0.0)
            .validate()
            .is_err());
        assert!(ConventionParameters::default()
            .with_clean(f64::INFINITY)
            .validate()
            .is_err());
        assert!(ConventionParameters::new(true, f64::NAN, ACT_365_FIXED)
            .validate()
            .is_err());
    }
}
