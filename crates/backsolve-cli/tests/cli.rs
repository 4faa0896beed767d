//! End-to-end tests for the `backsolve` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

/// A command isolated from the user's config file and log settings.
fn backsolve(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("backsolve").unwrap();
    cmd.env("BACKSOLVE_CONFIG", dir.path().join("config.json"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_schedule(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// 5/105 over two half-years on a zero curve.
fn zero_curve_bond(dir: &TempDir) -> PathBuf {
    write_schedule(
        dir,
        "bond.csv",
        "amount,date,rate\n5.0,182.5,0.0\n105.0,365,0.0\n",
    )
}

fn price_at(rate: f64) -> f64 {
    let df1 = 1.0 / (1.0 + rate * 0.5);
    let df2 = df1 / (1.0 + rate * 0.5);
    5.0 * df1 + 105.0 * df2
}

fn minimal_value(cmd: &mut Command) -> f64 {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap().trim().parse().unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// SOLVES
// =============================================================================

#[test]
fn test_spread_minimal() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    let spread = minimal_value(backsolve(&dir).args([
        "spread",
        "--schedule",
        path_arg(&schedule),
        "--target",
        &price_at(0.05).to_string(),
        "--format",
        "minimal",
    ]));

    assert!((spread - 0.05).abs() < 1e-8);
}

#[test]
fn test_spread_table() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    backsolve(&dir)
        .args(["spread", "-s", path_arg(&schedule), "--target", "104.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spread Backsolve"))
        .stdout(predicate::str::contains("bps"));
}

#[test]
fn test_yield_json() {
    let dir = TempDir::new().unwrap();
    let schedule = write_schedule(
        &dir,
        "deal.json",
        r#"[{"amount": -100.0, "date": 1}, {"amount": 110.0, "date": 366}]"#,
    );

    let output = backsolve(&dir)
        .args(["yield", "--schedule", path_arg(&schedule), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let irr = json["irr"].as_f64().unwrap();
    assert!((irr - 0.10).abs() < 1e-9);
    assert_eq!(json["cash_flows"], 2);
}

#[test]
fn test_price_at_zero_spread() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    backsolve(&dir)
        .args(["price", "-s", path_arg(&schedule), "--spread", "0", "-f", "minimal"])
        .assert()
        .success()
        .stdout("110.000000\n");
}

#[test]
fn test_price_requires_a_rate() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    backsolve(&dir)
        .args(["price", "-s", path_arg(&schedule)])
        .assert()
        .failure();
}

#[test]
fn test_negative_accrued_accepted() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    // Clean price = dirty - accrued, so a -0.5 accrual lifts the target
    let spread = minimal_value(backsolve(&dir).args([
        "spread",
        "-s",
        path_arg(&schedule),
        "--target",
        &(price_at(0.05) + 0.5).to_string(),
        "--clean",
        "--accrued",
        "-0.5",
        "-f",
        "minimal",
    ]));
    assert!((spread - 0.05).abs() < 1e-8);

    let deal = write_schedule(
        &dir,
        "deal.json",
        r#"[{"amount": -100.0, "date": 1}, {"amount": 110.0, "date": 366}]"#,
    );
    backsolve(&dir)
        .args(["yield", "-s", path_arg(&deal), "--clean", "--accrued", "-0.5"])
        .assert()
        .success();
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_spread_without_rates_fails() {
    let dir = TempDir::new().unwrap();
    let schedule = write_schedule(&dir, "bond.csv", "amount,date\n5.0,182\n105.0,365\n");

    backsolve(&dir)
        .args(["spread", "-s", path_arg(&schedule), "--target", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference rates"));
}

#[test]
fn test_flat_rate_fills_missing_curve() {
    let dir = TempDir::new().unwrap();
    let schedule = write_schedule(&dir, "bond.csv", "amount,date\n5.0,182.5\n105.0,365\n");

    let spread = minimal_value(backsolve(&dir).args([
        "spread",
        "-s",
        path_arg(&schedule),
        "--flat-rate",
        "0.03",
        "--target",
        &price_at(0.05).to_string(),
        "-f",
        "minimal",
    ]));

    assert!((spread - 0.02).abs() < 1e-8);
}

#[test]
fn test_non_increasing_dates_fail() {
    let dir = TempDir::new().unwrap();
    let schedule = write_schedule(&dir, "bond.csv", "amount,date,rate\n5.0,365,0\n105.0,182,0\n");

    backsolve(&dir)
        .args(["spread", "-s", path_arg(&schedule), "--target", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("monotonically increasing"));
}

#[test]
fn test_zero_cash_flows_diverge() {
    let dir = TempDir::new().unwrap();
    let schedule = write_schedule(&dir, "zero.csv", "amount,date,rate\n0,30,0.02\n0,60,0.02\n");

    backsolve(&dir)
        .args(["spread", "-s", path_arg(&schedule), "--target", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doesn't change"));
}

#[test]
fn test_iteration_budget_exhausted() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    backsolve(&dir)
        .args([
            "spread",
            "-s",
            path_arg(&schedule),
            "--target",
            "104.5",
            "--max-iterations",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to converge"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    backsolve(&dir)
        .args(["config", "set", "tolerance", "1e-12"])
        .assert()
        .success();

    backsolve(&dir)
        .args(["config", "get", "tolerance", "-f", "minimal"])
        .assert()
        .success()
        .stdout("1e-12\n");

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn test_config_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();

    backsolve(&dir)
        .args(["config", "set", "year_convention", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid year convention"));
}

#[test]
fn test_configured_format_applies() {
    let dir = TempDir::new().unwrap();
    let schedule = zero_curve_bond(&dir);

    backsolve(&dir)
        .args(["config", "set", "default_format", "json"])
        .assert()
        .success();

    backsolve(&dir)
        .args(["price", "-s", path_arg(&schedule), "--spread", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"present_value\": 110.0"));
}

#[test]
fn test_config_reset_all() {
    let dir = TempDir::new().unwrap();

    backsolve(&dir)
        .args(["config", "set", "max_iterations", "5"])
        .assert()
        .success();
    backsolve(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();

    backsolve(&dir)
        .args(["config", "get", "max_iterations", "-f", "minimal"])
        .assert()
        .success()
        .stdout("100\n");
}
