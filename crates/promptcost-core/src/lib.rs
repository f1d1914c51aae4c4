// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Promptcost usage-cost simulator.
//!
//! This crate provides the error type and the domain types shared by the
//! cost schedule, the simulation engine, and the reporting helpers.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PromptCostError;
pub use types::{RESULT_COLUMNS, UsageKind, UsageModel, UserResult};
