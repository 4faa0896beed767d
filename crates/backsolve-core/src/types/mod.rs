//! Domain types for cash flow backsolving.
//!
//! - [`CashFlow`]: A single dated amount
//! - [`CashFlowSchedule`]: Validated, ordered cash flows
//! - [`ReferenceRates`]: Per-period reference curve rates
//! - [`ConventionParameters`]: Clean/dirty treatment and year basis

mod conventions;
mod schedule;

pub use conventions::{ConventionParameters, ACT_360, ACT_365_FIXED};
pub use schedule::{validate_dates, CashFlow, CashFlowSchedule, ReferenceRates};
