//! Price command implementation.
//!
//! Evaluates a schedule's present value at a given spread or IRR.

use anyhow::Result;
use clap::{ArgGroup, Args};
use serde::Serialize;

use backsolve_analytics::pricing::{CurveSpreadModel, DiscountModel, FlatYieldModel};
use backsolve_core::types::ACT_365_FIXED;

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::{load_schedule, ConventionArgs, ScheduleArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("rate").required(true).args(["spread", "irr"])))]
pub struct PriceArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Spread over the reference curve (decimal, e.g. 0.0125)
    #[arg(long, allow_hyphen_values = true)]
    pub spread: Option<f64>,

    /// Flat annual IRR, Actual/365 (decimal, e.g. 0.05)
    #[arg(long, allow_hyphen_values = true)]
    pub irr: Option<f64>,

    /// Flat reference rate for every period, overriding any `rate` column
    #[arg(long, allow_hyphen_values = true, requires = "spread")]
    pub flat_rate: Option<f64>,

    #[command(flatten)]
    pub conventions: ConventionArgs,
}

/// Machine-readable pricing result.
#[derive(Debug, Serialize)]
struct PriceSummary {
    model: &'static str,
    rate: f64,
    present_value: f64,
    cash_flows: usize,
    clean: bool,
    accrued_interest: f64,
    year_convention: f64,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat, settings: &Settings) -> Result<()> {
    let loaded = load_schedule(&args.schedule.schedule)?;
    let mut conventions = args.conventions.conventions(settings);

    let (model, rate, present_value) = match (args.spread, args.irr) {
        (Some(spread), _) => {
            let rates = loaded.reference_rates(args.flat_rate)?;
            let model = CurveSpreadModel::new(&loaded.schedule, &rates, conventions)?;
            (model.name(), spread, model.present_value(spread))
        }
        (None, Some(irr)) => {
            conventions = conventions.with_year_convention(ACT_365_FIXED);
            let model = FlatYieldModel::new(&loaded.schedule, conventions)?;
            (model.name(), irr, model.present_value(irr))
        }
        (None, None) => anyhow::bail!("one of --spread or --irr is required"),
    };

    tracing::debug!(model, rate, present_value, "priced schedule");

    let precision = settings.decimal_precision;
    let rows = vec![
        KeyValue::new("Model", model),
        KeyValue::new("Cash Flows", loaded.schedule.len().to_string()),
        KeyValue::from_percent("Rate", rate, precision),
        KeyValue::new("Price Type", if conventions.is_clean { "Clean" } else { "Dirty" }),
        KeyValue::new("Year Convention", conventions.year_convention.to_string()),
        KeyValue::from_f64("Present Value", present_value, precision),
    ];

    let summary = PriceSummary {
        model,
        rate,
        present_value,
        cash_flows: loaded.schedule.len(),
        clean: conventions.is_clean,
        accrued_interest: conventions.price_adjustment(),
        year_convention: conventions.year_convention,
    };

    print_result(
        "Present Value",
        &rows,
        &summary,
        &format!("{:.prec$}", present_value, prec = precision),
        format,
    )
}
