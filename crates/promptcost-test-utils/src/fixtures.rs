// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule and config fixtures.

use promptcost_config::{SimulationConfig, UsageRange};
use promptcost_core::{UsageKind, UsageModel};
use promptcost_cost::CostSchedule;

/// A schedule with one model of each kind, at realistic per-unit prices.
pub fn mixed_schedule() -> CostSchedule {
    CostSchedule::new(vec![
        UsageModel::new(UsageKind::ImageCount, 0.002),
        UsageModel::new(UsageKind::RunTime, 0.000_225),
        UsageModel::new(UsageKind::InputTokenCount, 0.000_003),
        UsageModel::new(UsageKind::OutputTokenCount, 0.000_015),
    ])
    .expect("fixture schedule is non-empty")
}

/// A schedule containing a single model.
pub fn single_model_schedule(kind: UsageKind, unit_cost: f64) -> CostSchedule {
    CostSchedule::new(vec![UsageModel::new(kind, unit_cost)])
        .expect("fixture schedule is non-empty")
}

/// The mixed schedule as a CSV table with an extra descriptive column.
pub fn schedule_csv() -> String {
    [
        "Model,Type,Unit Cost ($)",
        "sdxl,image_count,0.002",
        "a100-runtime,run_time,0.000225",
        "llm-input,input_token_count,0.000003",
        "llm-output,output_token_count,0.000015",
    ]
    .join("\n")
        + "\n"
}

/// Builder for small, fast simulation configs.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SimulationConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Defaults with a population of 200 and a fixed seed.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig {
                population_size: 200,
                seed: Some(42),
                ..SimulationConfig::default()
            },
        }
    }

    pub fn population(mut self, size: u32) -> Self {
        self.config.population_size = size;
        self
    }

    pub fn mean_prompts(mut self, mean: u32) -> Self {
        self.config.mean_prompts = mean;
        self
    }

    pub fn image_range(mut self, min: u64, max: u64) -> Self {
        self.config.image_range = UsageRange::new(min, max);
        self
    }

    pub fn runtime_range(mut self, min: f64, max: f64) -> Self {
        self.config.runtime_range = UsageRange::new(min, max);
        self
    }

    pub fn token_range(mut self, min: u64, max: u64) -> Self {
        self.config.token_range = UsageRange::new(min, max);
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn build(self) -> SimulationConfig {
        self.config
    }
}
