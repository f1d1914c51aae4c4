// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptive statistics and histogram data over a result set.
//!
//! These compute what the reporting layer displays (summary table, cost
//! histogram); rendering is left to the caller.

use promptcost_core::UserResult;
use serde::Serialize;

/// `describe()`-style statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single value.
    pub std: f64,
    pub min: f64,
    /// First quartile.
    pub p25: f64,
    pub median: f64,
    /// Third quartile.
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarize `values`. Returns `None` for an empty slice or if any value is NaN.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| v.is_nan()) {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            p75: quantile_sorted(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Equal-width histogram over `[min, max]`; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` buckets. Returns `None` when there is nothing
    /// to bin, `bins` is zero, or a value is not finite.
    ///
    /// When every value is equal the range is widened to `value ± 0.5`.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 || values.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let (mut min, mut max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let bin_width = (max - min) / bins as f64;
        let mut histogram = Self {
            min,
            max,
            bin_width,
            counts: vec![0; bins],
        };
        for &v in values {
            let bin = histogram.bin_of(v);
            histogram.counts[bin] += 1;
        }
        Some(histogram)
    }

    /// Index of the bin `value` falls into, clamped to the outer bins.
    pub fn bin_of(&self, value: f64) -> usize {
        let last = self.counts.len() - 1;
        let idx = ((value - self.min) / self.bin_width).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(last)
        }
    }

    /// The `bins + 1` bin edges, ascending.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| self.min + i as f64 * self.bin_width)
            .collect()
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Summary of a whole run, as handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub users: usize,
    /// Statistics of `Total Prompts`.
    pub prompts: ColumnSummary,
    /// Statistics of `Total Monthly Cost ($)`.
    pub monthly_cost: ColumnSummary,
    /// Distribution of `Total Monthly Cost ($)`.
    pub cost_histogram: Histogram,
}

impl CostSummary {
    /// Summarize a result set. Returns `None` for an empty one.
    pub fn from_results(results: &[UserResult], bins: usize) -> Option<Self> {
        let prompts: Vec<f64> = results
            .iter()
            .map(|r| r.total_invocations as f64)
            .collect();
        let costs: Vec<f64> = results.iter().map(|r| r.total_monthly_cost).collect();

        Some(Self {
            users: results.len(),
            prompts: ColumnSummary::from_values(&prompts)?,
            monthly_cost: ColumnSummary::from_values(&costs)?,
            cost_histogram: Histogram::from_values(&costs, bins)?,
        })
    }

    /// `(Total Prompts, Total Monthly Cost ($))` pairs for a scatter plot.
    pub fn scatter_points(results: &[UserResult]) -> Vec<(u64, f64)> {
        results
            .iter()
            .map(|r| (r.total_invocations, r.total_monthly_cost))
            .collect()
    }
}
