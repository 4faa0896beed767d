//! Spread command implementation.
//!
//! Backsolves the spread over a reference curve that prices a schedule at a
//! target price.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use backsolve_analytics::BacksolveService;

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::{load_schedule, ConventionArgs, ScheduleArgs, SolverArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the spread command.
#[derive(Args, Debug)]
pub struct SpreadArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Target price in currency units (not a percentage of par)
    #[arg(long, allow_hyphen_values = true)]
    pub target: f64,

    /// Flat reference rate for every period, overriding any `rate` column
    #[arg(long, allow_hyphen_values = true)]
    pub flat_rate: Option<f64>,

    #[command(flatten)]
    pub conventions: ConventionArgs,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Machine-readable spread result.
#[derive(Debug, Serialize)]
struct SpreadSummary {
    spread: f64,
    spread_bps: f64,
    target_price: f64,
    cash_flows: usize,
    clean: bool,
    accrued_interest: f64,
    year_convention: f64,
    iterations: u32,
    residual: f64,
}

/// Execute the spread command.
pub fn execute(args: SpreadArgs, format: OutputFormat, settings: &Settings) -> Result<()> {
    let loaded = load_schedule(&args.schedule.schedule)?;
    let rates = loaded.reference_rates(args.flat_rate)?;
    let conventions = args.conventions.conventions(settings);

    let report = BacksolveService::new(args.solver.solver_config(settings)).solve_spread_report(
        &loaded.schedule,
        &rates,
        args.target,
        conventions,
    )?;
    let spread = report.into_result()?;

    let precision = settings.decimal_precision;
    let rows = vec![
        KeyValue::new("Cash Flows", loaded.schedule.len().to_string()),
        KeyValue::from_f64("Target Price", args.target, precision),
        KeyValue::new("Price Type", if conventions.is_clean { "Clean" } else { "Dirty" }),
        KeyValue::new("Year Convention", conventions.year_convention.to_string()),
        KeyValue::from_percent("Spread", spread, precision),
        KeyValue::from_bps("Spread (bps)", spread),
        KeyValue::new("Iterations", report.iterations.to_string()),
        KeyValue::new("Residual", format!("{:.2e}", report.residual)),
    ];

    let summary = SpreadSummary {
        spread,
        spread_bps: spread * 10_000.0,
        target_price: args.target,
        cash_flows: loaded.schedule.len(),
        clean: conventions.is_clean,
        accrued_interest: conventions.price_adjustment(),
        year_convention: conventions.year_convention,
        iterations: report.iterations,
        residual: report.residual,
    };

    print_result(
        "Spread Backsolve",
        &rows,
        &summary,
        &format!("{:.prec$}", spread, prec = precision + 4),
        format,
    )
}
