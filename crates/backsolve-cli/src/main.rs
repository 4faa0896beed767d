//! Backsolve CLI - spread and IRR solving for dated cash flows.
//!
//! # Usage
//!
//! ```bash
//! # Spread over the curve in the schedule's rate column
//! backsolve spread --schedule bond.csv --target 101.25
//!
//! # IRR of an investment
//! backsolve yield --schedule deal.json
//!
//! # Price at a spread
//! backsolve price --schedule bond.csv --spread 0.0125
//!
//! # Persist a default tolerance
//! backsolve config set tolerance 1e-12
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // A broken settings file must not lock out `config reset`
    let settings = match cli.command {
        Commands::Config(_) => Settings::load().unwrap_or_default(),
        _ => Settings::load()?,
    };
    if !settings.use_colors {
        colored::control::set_override(false);
    }

    // Command-line format wins over the configured default
    let format = cli.format.unwrap_or(settings.format);

    match cli.command {
        Commands::Spread(args) => commands::spread::execute(args, format, &settings)?,
        Commands::Yield(args) => commands::irr::execute(args, format, &settings)?,
        Commands::Price(args) => commands::price::execute(args, format, &settings)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only results.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
