// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as ordered and capped usage ranges, recognized consumption kinds, and positive prices.

use std::str::FromStr;

use promptcost_core::UsageKind;

use crate::diagnostic::ConfigError;
use crate::model::{PromptCostConfig, ScheduleEntryConfig, SimulationConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Upper bound on the average number of prompts per user per month.
pub const MAX_MEAN_PROMPTS: u32 = 500;
/// Upper bound on the number of simulated users in one run.
pub const MAX_POPULATION_SIZE: u32 = 1_000_000;
/// Upper bound on images generated by a single invocation.
pub const MAX_IMAGE_COUNT: u64 = 100;
/// Upper bound on the run time of a single invocation, in seconds.
pub const MAX_RUNTIME_SECONDS: f64 = 10_000.0;
/// Upper bound on input or output tokens of a single invocation.
pub const MAX_TOKEN_COUNT: u64 = 100_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PromptCostConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors: Vec<ConfigError> = simulation_violations(&config.simulation)
        .into_iter()
        .map(|message| ConfigError::Validation { message })
        .collect();

    errors.extend(validate_schedule_entries(&config.schedule));

    if config.report.histogram_bins == 0 {
        errors.push(ConfigError::Validation {
            message: "report.histogram_bins must be at least 1".to_string(),
        });
    }

    let level = config.logging.level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collect every invariant violation of a simulation config as a message.
///
/// An empty vector means the config is safe to simulate with. The engine
/// re-runs this check before any sampling so configs built in code get the
/// same guarantees as configs loaded from disk.
pub fn simulation_violations(sim: &SimulationConfig) -> Vec<String> {
    let mut violations = Vec::new();

    if !(1..=MAX_MEAN_PROMPTS).contains(&sim.mean_prompts) {
        violations.push(format!(
            "simulation.mean_prompts must be between 1 and {MAX_MEAN_PROMPTS}, got {}",
            sim.mean_prompts
        ));
    }

    if !(1..=MAX_POPULATION_SIZE).contains(&sim.population_size) {
        violations.push(format!(
            "simulation.population_size must be between 1 and {MAX_POPULATION_SIZE}, got {}",
            sim.population_size
        ));
    }

    if sim.degrees_of_freedom < 1 {
        violations.push(format!(
            "simulation.degrees_of_freedom must be positive, got {}",
            sim.degrees_of_freedom
        ));
    }

    if !sim.image_range.is_ordered() {
        violations.push(format!(
            "simulation.image_range min ({}) must not exceed max ({})",
            sim.image_range.min, sim.image_range.max
        ));
    }

    if !sim.token_range.is_ordered() {
        violations.push(format!(
            "simulation.token_range min ({}) must not exceed max ({})",
            sim.token_range.min, sim.token_range.max
        ));
    }

    if sim.image_range.max > MAX_IMAGE_COUNT {
        violations.push(format!(
            "simulation.image_range max must not exceed {MAX_IMAGE_COUNT}, got {}",
            sim.image_range.max
        ));
    }

    if sim.token_range.max > MAX_TOKEN_COUNT {
        violations.push(format!(
            "simulation.token_range max must not exceed {MAX_TOKEN_COUNT}, got {}",
            sim.token_range.max
        ));
    }

    let runtime = sim.runtime_range;
    if !runtime.min.is_finite() || !runtime.max.is_finite() {
        violations.push(format!(
            "simulation.runtime_range bounds must be finite, got [{}, {}]",
            runtime.min, runtime.max
        ));
    } else {
        if !runtime.is_ordered() {
            violations.push(format!(
                "simulation.runtime_range min ({}) must not exceed max ({})",
                runtime.min, runtime.max
            ));
        }
        if runtime.min < 0.0 {
            violations.push(format!(
                "simulation.runtime_range min must be non-negative, got {}",
                runtime.min
            ));
        }
        if runtime.max > MAX_RUNTIME_SECONDS {
            violations.push(format!(
                "simulation.runtime_range max must not exceed {MAX_RUNTIME_SECONDS} seconds, got {}",
                runtime.max
            ));
        }
    }

    violations
}

/// Validate inline `[[schedule]]` entries: known kinds and positive unit costs.
fn validate_schedule_entries(entries: &[ScheduleEntryConfig]) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        if UsageKind::from_str(entry.kind.trim()).is_err() {
            let valid: Vec<String> = UsageKind::ALL.iter().map(|k| k.to_string()).collect();
            errors.push(ConfigError::Validation {
                message: format!(
                    "schedule[{i}].type `{}` is not a recognized consumption kind (expected one of {})",
                    entry.kind,
                    valid.join(", ")
                ),
            });
        }

        if !entry.unit_cost.is_finite() || entry.unit_cost <= 0.0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "schedule[{i}].unit_cost must be a positive number, got {}",
                    entry.unit_cost
                ),
            });
        }
    }

    errors
}
