//! Cash flow schedules and reference rates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BacksolveError, BacksolveResult};

/// A single dated cash flow.
///
/// The date is an offset from the valuation date (typically in days),
/// not a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Cash flow amount in currency units.
    pub amount: f64,
    /// Offset from the valuation date.
    pub date: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(amount: f64, date: f64) -> Self {
        Self { amount, date }
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} @ {}", self.amount, self.date)
    }
}

/// An ordered, validated schedule of cash flows.
///
/// Invariants, established by every constructor:
/// - at least one cash flow
/// - amounts and dates have the same length
/// - dates are finite, strictly increasing, and the first date is > 0
///
/// The amounts and dates are owned copies of the caller's data and are never
/// mutated after construction.
///
/// # Example
///
/// ```rust
/// use backsolve_core::types::CashFlowSchedule;
///
/// let schedule = CashFlowSchedule::new(&[5.0, 105.0], &[182.0, 365.0]).unwrap();
/// assert_eq!(schedule.len(), 2);
/// assert_eq!(schedule.first_date(), 182.0);
///
/// assert!(CashFlowSchedule::new(&[5.0, 105.0], &[365.0, 182.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CashFlow>", into = "Vec<CashFlow>")]
pub struct CashFlowSchedule {
    amounts: Vec<f64>,
    dates: Vec<f64>,
}

impl CashFlowSchedule {
    /// Creates a schedule from parallel amount and date slices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the slices are empty, differ in length,
    /// or the dates are not strictly increasing from a positive start.
    /// Returns `AllocationFailure` if the owned buffers cannot be reserved.
    pub fn new(amounts: &[f64], dates: &[f64]) -> BacksolveResult<Self> {
        if amounts.is_empty() {
            return Err(BacksolveError::invalid_argument(
                "valid array of cash flows must have at least one entry",
            ));
        }
        if amounts.len() != dates.len() {
            return Err(BacksolveError::invalid_argument(format!(
                "cash flows ({}) and dates ({}) must have the same length",
                amounts.len(),
                dates.len()
            )));
        }
        validate_dates(dates)?;

        Ok(Self {
            amounts: copy_buffer("cash flows", amounts)?,
            dates: copy_buffer("dates", dates)?,
        })
    }

    /// Creates a schedule from a slice of cash flows.
    pub fn from_cash_flows(cash_flows: &[CashFlow]) -> BacksolveResult<Self> {
        let amounts: Vec<f64> = cash_flows.iter().map(|cf| cf.amount).collect();
        let dates: Vec<f64> = cash_flows.iter().map(|cf| cf.date).collect();
        Self::new(&amounts, &dates)
    }

    /// Returns the number of cash flows (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Returns the cash flow amounts.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Returns the cash flow dates.
    #[must_use]
    pub fn dates(&self) -> &[f64] {
        &self.dates
    }

    /// Returns the first (earliest) date.
    #[must_use]
    pub fn first_date(&self) -> f64 {
        self.dates[0]
    }

    /// Returns the last (latest) date.
    #[must_use]
    pub fn last_date(&self) -> f64 {
        self.dates[self.dates.len() - 1]
    }

    /// Returns an iterator over the cash flows in date order.
    pub fn iter(&self) -> impl Iterator<Item = CashFlow> + '_ {
        self.amounts
            .iter()
            .zip(&self.dates)
            .map(|(&amount, &date)| CashFlow::new(amount, date))
    }

    /// Returns the undiscounted sum of all amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

impl TryFrom<Vec<CashFlow>> for CashFlowSchedule {
    type Error = BacksolveError;

    fn try_from(cash_flows: Vec<CashFlow>) -> Result<Self, Self::Error> {
        Self::from_cash_flows(&cash_flows)
    }
}

impl From<CashFlowSchedule> for Vec<CashFlow> {
    fn from(schedule: CashFlowSchedule) -> Self {
        schedule.iter().collect()
    }
}

/// Reference-curve rates, one per cash flow period.
///
/// Rates are decimals (0.05 for 5%). The spread being solved for is added
/// to each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRates(Vec<f64>);

impl ReferenceRates {
    /// Creates reference rates from a slice.
    pub fn new(rates: &[f64]) -> BacksolveResult<Self> {
        Ok(Self(copy_buffer("reference rates", rates)?))
    }

    /// Creates reference rates and checks them against a schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the number of rates differs from the
    /// number of cash flows.
    pub fn for_schedule(rates: &[f64], schedule: &CashFlowSchedule) -> BacksolveResult<Self> {
        let rates = Self::new(rates)?;
        rates.check_length(schedule)?;
        Ok(rates)
    }

    /// A flat curve: the same rate for every period.
    ///
    /// A zero curve turns a spread solve into a yield solve on the
    /// chained convention.
    pub fn flat(rate: f64, len: usize) -> BacksolveResult<Self> {
        let mut rates = Vec::new();
        rates
            .try_reserve_exact(len)
            .map_err(|e| BacksolveError::allocation_failure("reference rates", &e))?;
        rates.resize(len, rate);
        Ok(Self(rates))
    }

    /// Checks that there is exactly one rate per cash flow.
    pub fn check_length(&self, schedule: &CashFlowSchedule) -> BacksolveResult<()> {
        if self.0.len() != schedule.len() {
            return Err(BacksolveError::invalid_argument(format!(
                "reference rates ({}) and cash flows ({}) must have the same length",
                self.0.len(),
                schedule.len()
            )));
        }
        Ok(())
    }

    /// Returns the rates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the number of rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Checks that dates are finite, strictly increasing and start above zero.
///
/// # Errors
///
/// Returns `InvalidArgument` describing the first offending date.
pub fn validate_dates(dates: &[f64]) -> BacksolveResult<()> {
    let mut prev_date = 0.0;
    for (i, &date) in dates.iter().enumerate() {
        if !date.is_finite() || date <= prev_date {
            return Err(BacksolveError::invalid_argument(format!(
                "dates must contain a list of monotonically increasing values, \
                 starting at a value > 0 (index {i}: {date})"
            )));
        }
        prev_date = date;
    }
    Ok(())
}

fn copy_buffer(name: &str, src: &[f64]) -> BacksolveResult<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|e| BacksolveError::allocation_failure(name, &e))?;
    buf.extend_from_slice(src);
    Ok(buf)
}
