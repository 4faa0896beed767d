//! Config command implementation.
//!
//! Manages CLI configuration settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use backsolve_core::types::ACT_365_FIXED;
use backsolve_math::solvers::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "BACKSOLVE_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Residual tolerance for solves
    Tolerance,
    /// Iteration budget for solves
    MaxIterations,
    /// Days per year for spread pricing
    YearConvention,
    /// Precision for decimal output
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "tolerance" | "tol" => Some(Self::Tolerance),
            "max_iterations" | "iterations" => Some(Self::MaxIterations),
            "year_convention" | "basis" => Some(Self::YearConvention),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::Tolerance => "tolerance",
            Self::MaxIterations => "max_iterations",
            Self::YearConvention => "year_convention",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::Tolerance => "Absolute residual at which a solve stops (>= 0)",
            Self::MaxIterations => "Maximum secant updates per solve",
            Self::YearConvention => "Days per year for spread pricing (365, 360, ...)",
            Self::DecimalPrecision => "Number of decimal places for output (2-10)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::Tolerance => "1e-10",
            Self::MaxIterations => "100",
            Self::YearConvention => "365",
            Self::DecimalPrecision => "6",
            Self::UseColors => "true",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::Tolerance,
            Self::MaxIterations,
            Self::YearConvention,
            Self::DecimalPrecision,
            Self::UseColors,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Config {
    fn load() -> Result<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    fn value(&self, key: ConfigKey) -> &str {
        self.get(key.as_str())
            .map(|s| s.as_str())
            .unwrap_or(key.default_value())
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Resolved settings used as defaults by the pricing commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub year_convention: f64,
    pub decimal_precision: usize,
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            year_convention: ACT_365_FIXED,
            decimal_precision: 6,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Loads settings from the config file; missing keys take their defaults.
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(&config)?)
    }

    fn from_config(config: &Config) -> CliResult<Self> {
        let parse = |key: ConfigKey| {
            let value = config.value(key);
            validate_config_value(key, value)
                .map(|()| value)
                .map_err(|e| CliError::Config(e.to_string()))
        };

        let format = parse(ConfigKey::DefaultFormat)?;
        Ok(Self {
            format: OutputFormat::parse(format).unwrap_or_default(),
            tolerance: parse_number(parse(ConfigKey::Tolerance)?)?,
            max_iterations: parse_number(parse(ConfigKey::MaxIterations)?)?,
            year_convention: parse_number(parse(ConfigKey::YearConvention)?)?,
            decimal_precision: parse_number(parse(ConfigKey::DecimalPrecision)?)?,
            use_colors: parse_bool(parse(ConfigKey::UseColors)?),
        })
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> CliResult<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("not a number: {value}")))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Get the config file path.
fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("backsolve").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let key = ConfigKey::from_str(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;

    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = ConfigKey::from_str(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;

    validate_config_value(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key.as_str().to_string(), args.value.clone());
    config.save()?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if args.all {
        config.clear();
        config.save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::from_str(&key_str)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key_str))?;
        config.remove(key.as_str());
        config.save()?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::DefaultFormat => {
            if OutputFormat::parse(value).is_none() {
                return Err(anyhow::anyhow!(
                    "Invalid format: {}. Use table, json, csv, or minimal.",
                    value
                ));
            }
        }
        ConfigKey::Tolerance => {
            let tolerance: f64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid tolerance: {}. Must be a number.", value))?;
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(anyhow::anyhow!(
                    "Invalid tolerance: {}. Must be finite and non-negative.",
                    value
                ));
            }
        }
        ConfigKey::MaxIterations => {
            value.parse::<u32>().map_err(|_| {
                anyhow::anyhow!("Invalid max_iterations: {}. Must be a whole number.", value)
            })?;
        }
        ConfigKey::YearConvention => {
            let days: f64 = value.parse().map_err(|_| {
                anyhow::anyhow!("Invalid year convention: {}. Must be a number.", value)
            })?;
            if !days.is_finite() || days <= 0.0 {
                return Err(anyhow::anyhow!(
                    "Invalid year convention: {}. Must be positive.",
                    value
                ));
            }
        }
        ConfigKey::DecimalPrecision => {
            let precision: u32 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid precision: {}. Must be a number.", value))?;
            if !(2..=10).contains(&precision) {
                return Err(anyhow::anyhow!(
                    "Invalid precision: {}. Must be between 2 and 10.",
                    precision
                ));
            }
        }
        ConfigKey::UseColors => {
            if !["true", "false", "1", "0", "yes", "no"].contains(&value.to_lowercase().as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid boolean: {}. Use true or false.",
                    value
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let settings = Settings::from_config(&Config::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_stored_values_override_defaults() {
        let mut config = Config::default();
        config.set("tolerance".into(), "1e-12".into());
        config.set("year_convention".into(), "360".into());
        config.set("default_format".into(), "JSON".into());

        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.tolerance, 1e-12);
        assert_eq!(settings.year_convention, 360.0);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_invalid_stored_value() {
        let mut config = Config::default();
        config.set("tolerance".into(), "-1".into());

        assert!(matches!(
            Settings::from_config(&config),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(ConfigKey::from_str("tol"), Some(ConfigKey::Tolerance));
        assert_eq!(ConfigKey::from_str("MAX_ITERATIONS"), Some(ConfigKey::MaxIterations));
        assert_eq!(ConfigKey::from_str("currency"), None);
    }

    #[test]
    fn test_validate_values() {
        assert!(validate_config_value(ConfigKey::Tolerance, "0").is_ok());
        assert!(validate_config_value(ConfigKey::Tolerance, "NaN").is_err());
        assert!(validate_config_value(ConfigKey::MaxIterations, "-5").is_err());
        assert!(validate_config_value(ConfigKey::YearConvention, "0").is_err());
        assert!(validate_config_value(ConfigKey::DecimalPrecision, "12").is_err());
    }
}
