// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptcost check` command implementation.
//!
//! Verifies that the configuration and cost schedule are usable without
//! running a simulation.

use std::io::IsTerminal;
use std::path::Path;

use promptcost_config::model::PromptCostConfig;
use promptcost_core::PromptCostError;
use promptcost_sim::SimulationEngine;

use crate::simulate::load_schedule;

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

/// Report which config files back the loaded configuration.
///
/// An explicit `--config` path that does not exist fails: figment skips
/// missing files, so the run would otherwise use defaults silently.
fn check_config_source(config_path: Option<&Path>) -> CheckResult {
    let overrides = promptcost_config::env_overrides();
    let env_note = if overrides.is_empty() {
        String::new()
    } else {
        format!(" (+{} env override(s))", overrides.len())
    };

    match config_path {
        Some(path) if !path.is_file() => CheckResult {
            name: "config",
            passed: false,
            message: format!("config file not found: {}", path.display()),
        },
        Some(path) => CheckResult {
            name: "config",
            passed: true,
            message: format!("loaded from {}{env_note}", path.display()),
        },
        None => {
            let files = promptcost_config::existing_config_files();
            let message = if files.is_empty() {
                format!("no config file found, using built-in defaults{env_note}")
            } else {
                let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
                format!("loaded from {}{env_note}", names.join(", "))
            };
            CheckResult {
                name: "config",
                passed: true,
                message,
            }
        }
    }
}

/// Run the config source, schedule and engine checks against a loaded config.
pub fn collect_checks(
    config: &PromptCostConfig,
    config_path: Option<&Path>,
    table: Option<&Path>,
) -> Vec<CheckResult> {
    let mut results = vec![check_config_source(config_path)];

    match load_schedule(config, table) {
        Ok(schedule) => {
            let mix: Vec<String> = schedule
                .kind_counts()
                .into_iter()
                .map(|(kind, n)| format!("{kind}={n}"))
                .collect();
            results.push(CheckResult {
                name: "schedule",
                passed: true,
                message: format!("{} entries ({})", schedule.size(), mix.join(", ")),
            });

            let engine = SimulationEngine::new(&schedule, &config.simulation);
            results.push(CheckResult {
                name: "engine",
                passed: engine.is_ok(),
                message: match engine {
                    Ok(_) => "ready".to_string(),
                    Err(e) => e.to_string(),
                },
            });
        }
        Err(e) => results.push(CheckResult {
            name: "schedule",
            passed: false,
            message: e.to_string(),
        }),
    }

    results
}

/// Run the `promptcost check` command, failing if any check failed.
pub fn run_check(
    config: &PromptCostConfig,
    config_path: Option<&Path>,
    table: Option<&Path>,
    plain: bool,
) -> Result<(), PromptCostError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config, config_path, table);

    println!();
    println!("  promptcost check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        let marker = match (result.passed, use_color) {
            (true, true) => {
                use colored::Colorize;
                "✓".green().to_string()
            }
            (false, true) => {
                use colored::Colorize;
                "✗".red().to_string()
            }
            (true, false) => "[OK]  ".to_string(),
            (false, false) => "[FAIL]".to_string(),
        };
        println!("    {marker} {:<10} {}", result.name, result.message);
    }
    println!();

    match results.iter().find(|r| !r.passed) {
        Some(failed) => Err(PromptCostError::InvalidConfig(format!(
            "{} check failed: {}",
            failed.name, failed.message
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use promptcost_config::model::ScheduleEntryConfig;

    use super::*;

    #[test]
    fn empty_schedule_fails_check() {
        let results = collect_checks(&PromptCostConfig::default(), None, None);
        let schedule = results.iter().find(|r| r.name == "schedule").unwrap();
        assert!(!schedule.passed);
        assert!(schedule.message.contains("empty"));
        assert!(run_check(&PromptCostConfig::default(), None, None, true).is_err());
    }

    #[test]
    fn valid_config_passes_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promptcost.toml");
        std::fs::write(&path, "[simulation]\nmean_prompts = 10\n").unwrap();

        let mut config = PromptCostConfig::default();
        config.schedule = vec![ScheduleEntryConfig {
            name: None,
            kind: "image_count".to_string(),
            unit_cost: 0.01,
        }];
        let results = collect_checks(&config, Some(&path), None);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert!(results[0].message.contains("promptcost.toml"));
        assert!(results[1].message.contains("image_count=1"));
    }

    #[test]
    fn missing_explicit_config_file_fails_check() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let result = check_config_source(Some(&missing));
        assert!(!result.passed);
        assert!(result.message.contains("not found"));
        assert!(result.message.contains("absent.toml"));
    }
}
