//! End-to-end tests for the `carcompare` binary
//!
//! Each test runs the compiled binary in a temporary directory against the
//! core crate's fixture catalog.

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../carcompare-core/tests/fixtures/cars.json")
}

/// Run the binary in `dir` with the environment override cleared
fn run_in(dir: &TempDir, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_carcompare"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("CARCOMPARE_DATA")
        .env_remove("RUST_LOG")
        .output()?)
}

/// Run against the fixture catalog via `--data`
fn run(args: &[&str]) -> Result<(TempDir, Output)> {
    let dir = TempDir::new()?;
    let data = fixture_path();
    let mut full_args = vec!["--data", data.to_str().unwrap_or_default()];
    full_args.extend_from_slice(args);
    let output = run_in(&dir, &full_args)?;
    Ok((dir, output))
}

fn stdout_json(output: &Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_brands_json() -> Result<()> {
    let (_dir, output) = run(&["brands", "--json"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let brands = stdout_json(&output)?;
    let names: Vec<&str> = brands
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|b| b["Name"].as_str())
        .collect();
    assert_eq!(names, vec!["Toyota", "Honda"]);
    Ok(())
}

#[test]
fn test_browse_down_to_trims() -> Result<()> {
    let (_dir, output) = run(&["models", "2", "--json"])?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?[1]["Name"], "Element");

    let (_dir, output) = run(&["generations", "3", "--json"])?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?.as_array().map(Vec::len), Some(2));

    let (_dir, output) = run(&["trims", "1", "--json"])?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?[1]["Name"], "Hybrid");
    Ok(())
}

#[test]
fn test_unknown_brand_fails() -> Result<()> {
    let (_dir, output) = run(&["models", "99"])?;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Brand 99 not found"));
    Ok(())
}

#[test]
fn test_search_cards() -> Result<()> {
    let (_dir, output) = run(&[
        "search",
        "--brand",
        "toyota",
        "--transmission",
        "automatic",
        "--json",
    ])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let cards = stdout_json(&output)?;
    let ids: Vec<i64> = cards
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["GenerationId"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(cards[0]["TrimCount"], 1);
    Ok(())
}

#[test]
fn test_search_table_output() -> Result<()> {
    let (_dir, output) = run(&["search", "--body-type", "sedan"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("XV70"));
    assert!(stdout.contains("2017-2024"));
    assert!(!stdout.contains("RAV4"));
    Ok(())
}

#[test]
fn test_search_tree() -> Result<()> {
    let (_dir, output) = run(&["search", "--tree", "--min-year", "2018", "--json"])?;

    assert!(output.status.success());
    let brands = stdout_json(&output)?;
    assert_eq!(brands[0]["Models"][0]["Generations"][0]["Name"], "XV70");
    assert_eq!(
        brands[0]["Models"][0]["Generations"][0]["Trims"][0]["TechnicalDetails"],
        Value::Null
    );
    Ok(())
}

#[test]
fn test_invalid_filters_are_rejected() -> Result<()> {
    let (_dir, output) = run(&["search", "--model", "camry", "--min-year", "1800"])?;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("requires a brand"), "stderr: {err}");
    assert!(err.contains("earlier than 1900"), "stderr: {err}");
    Ok(())
}

#[test]
fn test_search_without_match_fails() -> Result<()> {
    let (_dir, output) = run(&["search", "--brand", "bmw"])?;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No generations match"));
    Ok(())
}

#[test]
fn test_trim_details() -> Result<()> {
    let (_dir, output) = run(&["trim", "5", "--json"])?;

    assert!(output.status.success());
    let trim = stdout_json(&output)?;
    assert_eq!(trim["Name"], "Prime");
    assert_eq!(trim["Model"]["Name"], "RAV4");
    assert_eq!(trim["TechnicalDetails"]["Power"], 302);
    Ok(())
}

#[test]
fn test_compare_highlights() -> Result<()> {
    let (_dir, output) = run(&["compare", "1,2", "--json"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let comparison = stdout_json(&output)?;
    assert_eq!(comparison["Highlights"]["Power_Best"], serde_json::json!([0]));
    assert_eq!(comparison["Highlights"]["Power_Worst"], serde_json::json!([1]));
    Ok(())
}

#[test]
fn test_compare_table_marks_best() -> Result<()> {
    let (_dir, output) = run(&["compare", "1,2"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LE [1]"));
    assert!(stdout.contains("203 (best)"));
    Ok(())
}

#[test]
fn test_compare_too_many_trims() -> Result<()> {
    let (_dir, output) = run(&["compare", "1,2,3,4,5"])?;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("at most 4"));
    Ok(())
}

#[test]
fn test_config_file_limits_comparison() -> Result<()> {
    let dir = TempDir::new()?;
    fs::copy(fixture_path(), dir.path().join("cars.json"))?;
    fs::write(
        dir.path().join("carcompare.yml"),
        "data_path: cars.json\nmax_compare: 2\n",
    )?;

    let output = run_in(&dir, &["compare", "1,2,3"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("at most 2"));

    let output = run_in(&dir, &["compare", "1,2", "--json"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    Ok(())
}

#[test]
fn test_environment_data_path() -> Result<()> {
    let dir = TempDir::new()?;

    let output = Command::new(env!("CARGO_BIN_EXE_carcompare"))
        .args(["stats", "--json"])
        .current_dir(dir.path())
        .env("CARCOMPARE_DATA", fixture_path())
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stats = stdout_json(&output)?;
    assert_eq!(stats["brands"], 2);
    assert_eq!(stats["trims"], 8);
    Ok(())
}

#[test]
fn test_missing_data_file_fails() -> Result<()> {
    let dir = TempDir::new()?;

    let output = run_in(&dir, &["--data", "nowhere.json", "brands"])?;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load catalog data"));
    Ok(())
}
