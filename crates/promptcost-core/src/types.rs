// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the schedule, the engine, and the reporting layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The dimension an invocation is billed on.
///
/// String forms match the `Type` column of a cost schedule table
/// (`image_count`, `run_time`, `input_token_count`, `output_token_count`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    /// Billed per generated image.
    ImageCount,
    /// Billed per second of compute run time.
    RunTime,
    /// Billed per prompt token.
    InputTokenCount,
    /// Billed per completion token.
    OutputTokenCount,
}

impl UsageKind {
    /// All recognized kinds, in declaration order.
    pub const ALL: [UsageKind; 4] = [
        UsageKind::ImageCount,
        UsageKind::RunTime,
        UsageKind::InputTokenCount,
        UsageKind::OutputTokenCount,
    ];

    /// Whether usage of this kind is drawn as a whole number of units.
    pub fn is_discrete(self) -> bool {
        !matches!(self, UsageKind::RunTime)
    }
}

/// One priced record of the cost schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageModel {
    /// What the model bills for.
    pub kind: UsageKind,
    /// Price in USD per unit of `kind`.
    pub unit_cost: f64,
}

impl UsageModel {
    pub fn new(kind: UsageKind, unit_cost: f64) -> Self {
        Self { kind, unit_cost }
    }

    /// Cost in USD of consuming `usage` units under this model.
    pub fn cost_of(&self, usage: f64) -> f64 {
        usage * self.unit_cost
    }
}

/// Per-user aggregate produced by one simulation run.
///
/// Serializes with the column names the reporting layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserResult {
    /// Dense 1-based identifier, ascending in emission order.
    #[serde(rename = "User ID")]
    pub user_id: u32,
    /// Number of simulated invocations this month (always at least one).
    #[serde(rename = "Total Prompts")]
    pub total_invocations: u64,
    /// Sum of every invocation's cost in USD.
    #[serde(rename = "Total Monthly Cost ($)")]
    pub total_monthly_cost: f64,
}

/// Column headers of a result table, in order.
pub const RESULT_COLUMNS: [&str; 3] = ["User ID", "Total Prompts", "Total Monthly Cost ($)"];
