// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation usage draws, conditioned on the consumption kind.
//!
//! Bound inclusivity is deliberately asymmetric and must stay that way:
//!
//! | kind | draw | bounds |
//! |---|---|---|
//! | `image_count` | integer uniform | `[min, max)` |
//! | `run_time` | real uniform | `[min, max]` |
//! | `input_token_count`, `output_token_count` | integer uniform | `[min, max)` |
//!
//! An integer range with `min == max` has no values under the half-open
//! convention; it is treated as degenerate and always yields `min`.

use promptcost_config::{SimulationConfig, UsageRange};
use promptcost_core::{PromptCostError, UsageKind};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

/// An integer draw strictly below `max`, or a fixed value for `min == max`.
#[derive(Debug, Clone)]
enum CountDraw {
    Fixed(u64),
    HalfOpen(Uniform<u64>),
}

impl CountDraw {
    fn new(range: UsageRange<u64>, field: &str) -> Result<Self, PromptCostError> {
        if range.min > range.max {
            return Err(PromptCostError::InvalidConfig(format!(
                "{field} min ({}) must not exceed max ({})",
                range.min, range.max
            )));
        }
        if range.is_degenerate() {
            Ok(CountDraw::Fixed(range.min))
        } else {
            Ok(CountDraw::HalfOpen(Uniform::new(range.min, range.max)))
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            CountDraw::Fixed(value) => *value,
            CountDraw::HalfOpen(dist) => dist.sample(rng),
        }
    }
}

/// Pre-built usage distributions for one simulation config.
#[derive(Debug, Clone)]
pub struct UsageSampler {
    images: CountDraw,
    runtime: Uniform<f64>,
    tokens: CountDraw,
}

impl UsageSampler {
    /// Build the three distributions, rejecting inverted or non-finite ranges.
    pub fn new(config: &SimulationConfig) -> Result<Self, PromptCostError> {
        let runtime = config.runtime_range;
        if !runtime.min.is_finite() || !runtime.max.is_finite() || runtime.min > runtime.max {
            return Err(PromptCostError::InvalidConfig(format!(
                "runtime_range [{}, {}] is not an ordered finite range",
                runtime.min, runtime.max
            )));
        }

        // rand's float uniform divides the span by the largest unit draw and
        // panics if that overflows.
        if !((runtime.max - runtime.min) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(PromptCostError::InvalidConfig(format!(
                "runtime_range [{}, {}] is too wide to sample from",
                runtime.min, runtime.max
            )));
        }

        Ok(Self {
            images: CountDraw::new(config.image_range, "image_range")?,
            runtime: Uniform::new_inclusive(runtime.min, runtime.max),
            tokens: CountDraw::new(config.token_range, "token_range")?,
        })
    }

    /// Draw the usage of one invocation billed on `kind`, in that kind's units.
    pub fn draw<R: Rng + ?Sized>(&self, kind: UsageKind, rng: &mut R) -> f64 {
        match kind {
            UsageKind::ImageCount => self.images.sample(rng) as f64,
            UsageKind::RunTime => self.runtime.sample(rng),
            UsageKind::InputTokenCount | UsageKind::OutputTokenCount => {
                self.tokens.sample(rng) as f64
            }
        }
    }
}
