// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Promptcost simulator.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Promptcost configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the values of the reference parameter form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptCostConfig {
    /// Distribution bounds and population settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Inline cost schedule entries. A schedule table passed on the command
    /// line takes precedence over these.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntryConfig>,

    /// Settings for the summary handed to the reporting layer.
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// An inclusive-declared `[min, max]` pair of usage bounds.
///
/// Whether the upper bound is reachable by a draw depends on the consumption
/// kind: integer draws exclude `max`, run time draws include it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsageRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> UsageRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Whether `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Whether the range collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Monte Carlo run parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Center of the per-user monthly invocation count.
    #[serde(default = "default_mean_prompts")]
    pub mean_prompts: u32,

    /// Images produced per image-billed invocation.
    #[serde(default = "default_image_range")]
    pub image_range: UsageRange<u64>,

    /// Seconds of compute per runtime-billed invocation.
    #[serde(default = "default_runtime_range")]
    pub runtime_range: UsageRange<f64>,

    /// Tokens per token-billed invocation (input and output alike).
    #[serde(default = "default_token_range")]
    pub token_range: UsageRange<u64>,

    /// Degrees of freedom of the Student-t draw that shapes invocation counts.
    #[serde(default = "default_degrees_of_freedom")]
    pub degrees_of_freedom: u32,

    /// Number of synthetic users to simulate.
    #[serde(default = "default_population_size")]
    pub population_size: u32,

    /// Fixed seed for reproducible runs. `None` draws a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulate users on the rayon thread pool. Output is identical either way.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mean_prompts: default_mean_prompts(),
            image_range: default_image_range(),
            runtime_range: default_runtime_range(),
            token_range: default_token_range(),
            degrees_of_freedom: default_degrees_of_freedom(),
            population_size: default_population_size(),
            seed: None,
            parallel: false,
        }
    }
}

fn default_mean_prompts() -> u32 {
    40
}

fn default_image_range() -> UsageRange<u64> {
    UsageRange::new(1, 5)
}

fn default_runtime_range() -> UsageRange<f64> {
    UsageRange::new(10.0, 600.0)
}

fn default_token_range() -> UsageRange<u64> {
    UsageRange::new(100, 10_000)
}

fn default_degrees_of_freedom() -> u32 {
    30
}

fn default_population_size() -> u32 {
    5000
}

/// One row of a cost schedule as declared in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleEntryConfig {
    /// Optional human-readable model name, used only in logs.
    #[serde(default)]
    pub name: Option<String>,

    /// Consumption kind string (`image_count`, `run_time`,
    /// `input_token_count`, `output_token_count`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Price in USD per unit of the consumption kind.
    pub unit_cost: f64,
}

/// Reporting data settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Number of equal-width bins for the monthly cost histogram.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_histogram_bins() -> usize {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_form() {
        let sim = SimulationConfig::default();
        assert_eq!(sim.mean_prompts, 40);
        assert_eq!(sim.image_range, UsageRange::new(1, 5));
        assert_eq!(sim.runtime_range, UsageRange::new(10.0, 600.0));
        assert_eq!(sim.token_range, UsageRange::new(100, 10_000));
        assert_eq!(sim.degrees_of_freedom, 30);
        assert_eq!(sim.population_size, 5000);
        assert!(sim.seed.is_none());
        assert!(!sim.parallel);
    }

    #[test]
    fn range_ordering_helpers() {
        assert!(UsageRange::new(1, 5).is_ordered());
        assert!(UsageRange::new(3, 3).is_ordered());
        assert!(UsageRange::new(3, 3).is_degenerate());
        assert!(!UsageRange::new(600.0, 10.0).is_ordered());
    }

    #[test]
    fn schedule_entry_reads_type_key() {
        let toml_str = r#"
[[schedule]]
name = "sdxl"
type = "image_count"
unit_cost = 0.002
"#;
        let config: PromptCostConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.schedule.len(), 1);
        assert_eq!(config.schedule[0].kind, "image_count");
        assert_eq!(config.schedule[0].name.as_deref(), Some("sdxl"));
    }

    #[test]
    fn range_denies_unknown_fields() {
        let toml_str = r#"
[simulation.image_range]
min = 1
maximum = 5
"#;
        assert!(toml::from_str::<PromptCostConfig>(toml_str).is_err());
    }
}
