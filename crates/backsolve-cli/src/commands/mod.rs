//! CLI command implementations.

pub mod config;
pub mod irr;
pub mod price;
pub mod spread;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use irr::YieldArgs;
pub use price::PriceArgs;
pub use spread::SpreadArgs;

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;

use backsolve_core::types::{CashFlowSchedule, ConventionParameters, ReferenceRates};
use backsolve_math::solvers::SolverConfig;

use crate::commands::config::Settings;
use crate::error::{CliError, CliResult};

/// Schedule file argument shared by every pricing command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Cash flow file: CSV with an `amount,date[,rate]` header, or a JSON
    /// array of `{"amount", "date", "rate"}` objects
    #[arg(short, long)]
    pub schedule: PathBuf,
}

/// Clean/dirty and year basis flags.
#[derive(Args, Debug)]
pub struct ConventionArgs {
    /// Treat the price as clean (accrued interest is subtracted)
    #[arg(long)]
    pub clean: bool,

    /// Accrued interest, in currency units (used with --clean)
    #[arg(long, default_value = "0", requires = "clean", allow_hyphen_values = true)]
    pub accrued: f64,

    /// Days per year (defaults to the configured `year_convention`)
    #[arg(long)]
    pub year_convention: Option<f64>,
}

impl ConventionArgs {
    /// Builds convention parameters, falling back to the configured basis.
    pub fn conventions(&self, settings: &Settings) -> ConventionParameters {
        ConventionParameters::new(
            self.clean,
            self.accrued,
            self.year_convention.unwrap_or(settings.year_convention),
        )
    }
}

/// Solver overrides.
#[derive(Args, Debug)]
pub struct SolverArgs {
    /// Residual tolerance (defaults to the configured `tolerance`)
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Iteration budget (defaults to the configured `max_iterations`)
    #[arg(short, long)]
    pub max_iterations: Option<u32>,
}

impl SolverArgs {
    /// Builds a solver configuration, falling back to the configured values.
    pub fn solver_config(&self, settings: &Settings) -> SolverConfig {
        SolverConfig::new(
            self.tolerance.unwrap_or(settings.tolerance),
            self.max_iterations.unwrap_or(settings.max_iterations),
        )
    }
}

/// One row of a schedule file.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ScheduleRow {
    amount: f64,
    date: f64,
    #[serde(default)]
    rate: Option<f64>,
}

/// A validated schedule and, when the file carries them, its reference rates.
#[derive(Debug)]
pub struct LoadedSchedule {
    pub schedule: CashFlowSchedule,
    pub rates: Option<ReferenceRates>,
}

impl LoadedSchedule {
    /// Returns the reference rates, or a flat curve at `flat_rate`.
    pub fn reference_rates(&self, flat_rate: Option<f64>) -> CliResult<ReferenceRates> {
        match (flat_rate, &self.rates) {
            (Some(rate), _) => Ok(ReferenceRates::flat(rate, self.schedule.len())?),
            (None, Some(rates)) => Ok(rates.clone()),
            (None, None) => Err(CliError::MissingArgument(
                "reference rates: add a `rate` column to the schedule or pass --flat-rate".into(),
            )),
        }
    }
}

/// Loads a schedule file, choosing the parser by extension.
pub fn load_schedule(path: &Path) -> CliResult<LoadedSchedule> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let rows = match extension.as_deref() {
        Some("csv") => read_csv_rows(path)?,
        Some("json") => serde_json::from_reader(File::open(path)?)?,
        _ => return Err(CliError::UnsupportedSchedule(path.display().to_string())),
    };

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded schedule");
    build_schedule(&rows)
}

fn read_csv_rows(path: &Path) -> CliResult<Vec<ScheduleRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn build_schedule(rows: &[ScheduleRow]) -> CliResult<LoadedSchedule> {
    let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
    let dates: Vec<f64> = rows.iter().map(|r| r.date).collect();
    let schedule = CashFlowSchedule::new(&amounts, &dates)?;

    let rates: Vec<f64> = rows.iter().filter_map(|r| r.rate).collect();
    let rates = if rates.is_empty() {
        None
    } else if rates.len() == rows.len() {
        Some(ReferenceRates::new(&rates)?)
    } else {
        return Err(CliError::InvalidSchedule(format!(
            "{} of {} rows have a rate; give every row a rate or none",
            rates.len(),
            rows.len()
        )));
    };

    Ok(LoadedSchedule { schedule, rates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_with_rates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bond.csv",
            "amount,date,rate\n5.0,182,0.04\n105.0,365,0.045\n",
        );

        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.schedule.amounts(), &[5.0, 105.0]);
        assert_eq!(loaded.rates.unwrap().as_slice(), &[0.04, 0.045]);
    }

    #[test]
    fn test_load_json_without_rates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "deal.json",
            r#"[{"amount": -100.0, "date": 1}, {"amount": 110.0, "date": 366}]"#,
        );

        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.schedule.dates(), &[1.0, 366.0]);
        assert!(loaded.rates.is_none());
        assert!(loaded.reference_rates(None).is_err());
        assert_eq!(loaded.reference_rates(Some(0.03)).unwrap().as_slice(), &[0.03, 0.03]);
    }

    #[test]
    fn test_partial_rates_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bond.csv", "amount,date,rate\n5.0,182,0.04\n105.0,365,\n");

        assert!(matches!(
            load_schedule(&path),
            Err(CliError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bond.txt", "amount,date\n5.0,182\n");

        assert!(matches!(
            load_schedule(&path),
            Err(CliError::UnsupportedSchedule(_))
        ));
    }

    #[test]
    fn test_invalid_dates_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bond.csv", "amount,date\n5.0,365\n105.0,182\n");

        assert!(matches!(load_schedule(&path), Err(CliError::Validation(_))));
    }
}
