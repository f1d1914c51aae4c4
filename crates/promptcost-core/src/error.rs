// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Promptcost simulator.

use thiserror::Error;

/// The primary error type used across schedule construction, simulation, and export.
///
/// Every variant is fatal: a run either completes for the whole population or
/// returns one of these before producing any results.
#[derive(Debug, Error)]
pub enum PromptCostError {
    /// The cost schedule has no entries, so there is nothing to sample from.
    #[error("cost schedule is empty")]
    EmptySchedule,

    /// A simulation configuration violates its invariants (inverted range,
    /// zero population, mean prompts below one, ...).
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// A schedule entry names a consumption kind the engine does not know how to bill.
    #[error("unrecognized consumption kind `{kind}`")]
    UnrecognizedKind { kind: String },

    /// A schedule table could not be read or a row was malformed.
    #[error("schedule error: {message}")]
    Schedule {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem errors while reading inputs or writing outputs.
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Result export failures (CSV/JSON serialization).
    #[error("export error: {message}")]
    Export {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
