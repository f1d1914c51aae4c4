// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV export of result sets with the reporting column names.

use std::io::Write;
use std::path::Path;

use promptcost_core::{PromptCostError, UserResult};
use tracing::info;

fn export_error(message: &str, err: impl std::error::Error + Send + Sync + 'static) -> PromptCostError {
    PromptCostError::Export {
        message: message.to_string(),
        source: Some(Box::new(err)),
    }
}

/// Write `results` as CSV (`User ID`, `Total Prompts`, `Total Monthly Cost ($)`).
pub fn write_csv<W: Write>(results: &[UserResult], writer: W) -> Result<(), PromptCostError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer
            .serialize(result)
            .map_err(|e| export_error("failed to serialize result row", e))?;
    }
    csv_writer
        .flush()
        .map_err(|e| export_error("failed to flush result rows", e))
}

/// Write `results` to a CSV file, replacing any existing file.
pub fn write_csv_path(results: &[UserResult], path: &Path) -> Result<(), PromptCostError> {
    let file = std::fs::File::create(path)?;
    write_csv(results, std::io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = results.len(), "wrote results");
    Ok(())
}
