//! Yield command implementation.
//!
//! Backsolves the flat annual IRR (Actual/365) at which a schedule's net
//! present value is zero.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use backsolve_analytics::BacksolveService;
use backsolve_core::types::{ConventionParameters, ACT_365_FIXED};

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::{load_schedule, ScheduleArgs, SolverArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Subtract accrued interest from the net present value
    #[arg(long)]
    pub clean: bool,

    /// Accrued interest, in currency units (used with --clean)
    #[arg(long, default_value = "0", requires = "clean", allow_hyphen_values = true)]
    pub accrued: f64,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Machine-readable yield result.
#[derive(Debug, Serialize)]
struct YieldSummary {
    irr: f64,
    irr_percent: f64,
    cash_flows: usize,
    first_date: f64,
    last_date: f64,
    clean: bool,
    accrued_interest: f64,
    iterations: u32,
    residual: f64,
}

/// Execute the yield command.
pub fn execute(args: YieldArgs, format: OutputFormat, settings: &Settings) -> Result<()> {
    let loaded = load_schedule(&args.schedule.schedule)?;
    let schedule = &loaded.schedule;
    let conventions = ConventionParameters::new(args.clean, args.accrued, ACT_365_FIXED);

    let report = BacksolveService::new(args.solver.solver_config(settings))
        .solve_yield_report(schedule, conventions)?;
    let irr = report.into_result()?;

    let precision = settings.decimal_precision;
    let rows = vec![
        KeyValue::new("Cash Flows", schedule.len().to_string()),
        KeyValue::new("Period", format!("{} - {}", schedule.first_date(), schedule.last_date())),
        KeyValue::from_f64("Net Cash", schedule.total(), precision),
        KeyValue::new("Price Type", if args.clean { "Clean" } else { "Dirty" }),
        KeyValue::from_percent("IRR", irr, precision),
        KeyValue::new("Iterations", report.iterations.to_string()),
        KeyValue::new("Residual", format!("{:.2e}", report.residual)),
    ];

    let summary = YieldSummary {
        irr,
        irr_percent: irr * 100.0,
        cash_flows: schedule.len(),
        first_date: schedule.first_date(),
        last_date: schedule.last_date(),
        clean: args.clean,
        accrued_interest: conventions.price_adjustment(),
        iterations: report.iterations,
        residual: report.residual,
    };

    print_result(
        "IRR Backsolve",
        &rows,
        &summary,
        &format!("{:.prec$}", irr, prec = precision + 4),
        format,
    )
}
