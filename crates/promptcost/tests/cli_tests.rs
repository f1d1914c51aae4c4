// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `promptcost` binary.
//!
//! Each test writes its own config and schedule into a temp directory and
//! passes them explicitly, so no user or system config is consulted.

use std::path::Path;
use std::process::{Command, Output};

use promptcost_test_utils::schedule_csv;

fn promptcost(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_promptcost"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should run")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

const SMALL_CONFIG: &str = r#"
[simulation]
population_size = 120
mean_prompts = 20
"#;

#[test]
fn simulate_prints_json_summary_with_seed() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "promptcost.toml", SMALL_CONFIG);
    let schedule = write(dir.path(), "schedule.csv", &schedule_csv());

    let out = promptcost(&[
        "simulate", "--config", &config, "--schedule", &schedule, "--seed", "11", "--json",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["seed"], 11);
    assert_eq!(report["summary"]["users"], 120);
    assert_eq!(report["summary"]["cost_histogram"]["counts"].as_array().unwrap().len(), 30);
}

#[test]
fn same_seed_produces_identical_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "promptcost.toml", SMALL_CONFIG);
    let schedule = write(dir.path(), "schedule.csv", &schedule_csv());
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    for (output, parallel) in [(&first, false), (&second, true)] {
        let output = output.display().to_string();
        let mut args = vec![
            "simulate", "--config", &config, "--schedule", &schedule, "--seed", "5", "--output",
            &output,
        ];
        if parallel {
            args.push("--parallel");
        }
        let out = promptcost(&args);
        assert!(out.status.success());
    }

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
    assert!(String::from_utf8(a).unwrap().starts_with("User ID,Total Prompts,Total Monthly Cost ($)"));
}

#[test]
fn inline_schedule_is_used_without_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "promptcost.toml",
        r#"
[simulation]
population_size = 10

[[schedule]]
type = "run_time"
unit_cost = 2.0

[simulation.runtime_range]
min = 10
max = 10
"#,
    );

    let out = promptcost(&["simulate", "--config", &config, "--seed", "1", "--json"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let mean_prompts = report["summary"]["prompts"]["mean"].as_f64().unwrap();
    let mean_cost = report["summary"]["monthly_cost"]["mean"].as_f64().unwrap();
    assert!((mean_cost - mean_prompts * 20.0).abs() < 1e-6);
}

#[test]
fn inverted_range_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "promptcost.toml",
        "[simulation]\nruntime_range = { min = 600, max = 10 }\n",
    );

    let out = promptcost(&["check", "--config", &config, "--plain"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("runtime_range"));
}

#[test]
fn check_fails_without_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "promptcost.toml", SMALL_CONFIG);

    let out = promptcost(&["check", "--config", &config, "--plain"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("[FAIL]"));
}

#[test]
fn check_passes_with_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "promptcost.toml", SMALL_CONFIG);
    let schedule = write(dir.path(), "schedule.csv", &schedule_csv());

    let out = promptcost(&["check", "--config", &config, "--schedule", &schedule, "--plain"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("4 entries"));
}

#[test]
fn check_reports_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write(dir.path(), "schedule.csv", &schedule_csv());
    let missing = dir.path().join("nope.toml").display().to_string();

    let out = promptcost(&["check", "--config", &missing, "--schedule", &schedule, "--plain"]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("config file not found"));
}

#[test]
fn oversized_mean_prompts_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "promptcost.toml",
        "[simulation]\nmean_prompts = 100000\n",
    );

    let out = promptcost(&["simulate", "--config", &config]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("mean_prompts"));
}
