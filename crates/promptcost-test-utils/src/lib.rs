// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for Promptcost integration tests.
//!
//! Provides ready-made cost schedules and a builder for small simulation
//! configs so tests stay fast and read the same across crates.

pub mod fixtures;

pub use fixtures::{ConfigBuilder, mixed_schedule, schedule_csv, single_model_schedule};
