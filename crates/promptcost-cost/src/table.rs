// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion of cost schedule tables exported as CSV.
//!
//! The table must have a `Type` column holding one of the consumption kind
//! strings and a `Unit Cost ($)` column holding a positive price. Other
//! columns (model name, provider, notes) are ignored.

use std::io::Read;
use std::path::Path;

use promptcost_core::{PromptCostError, UsageModel};
use serde::Deserialize;
use tracing::info;

use crate::schedule::{CostSchedule, parse_kind};

/// Header of the consumption kind column.
pub const TYPE_COLUMN: &str = "Type";

/// Header of the unit price column.
pub const UNIT_COST_COLUMN: &str = "Unit Cost ($)";

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Unit Cost ($)")]
    unit_cost: f64,
}

impl CostSchedule {
    /// Read a schedule table from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PromptCostError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut models = Vec::new();
        for (i, row) in csv_reader.deserialize::<ScheduleRow>().enumerate() {
            // Row 1 is the header line.
            let line = i + 2;
            let row = row.map_err(|e| PromptCostError::Schedule {
                message: format!("malformed schedule row at line {line}"),
                source: Some(Box::new(e)),
            })?;

            let kind = parse_kind(&row.kind)?;
            if !row.unit_cost.is_finite() || row.unit_cost <= 0.0 {
                return Err(PromptCostError::Schedule {
                    message: format!(
                        "`{UNIT_COST_COLUMN}` must be positive at line {line}, got {}",
                        row.unit_cost
                    ),
                    source: None,
                });
            }
            models.push(UsageModel::new(kind, row.unit_cost));
        }

        CostSchedule::new(models)
    }

    /// Read a schedule table from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, PromptCostError> {
        let file = std::fs::File::open(path)?;
        let schedule = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            entries = schedule.size(),
            "loaded cost schedule table"
        );
        Ok(schedule)
    }
}
