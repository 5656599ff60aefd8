//! Trend statistics derived from the daily series.

use serde::{Deserialize, Serialize};

use crate::series::DailyBucket;

/// Relative change beyond which growth counts as up or down.
const DIRECTION_THRESHOLD: f64 = 0.10;

/// With no prior-window baseline, this many stars in the last window still
/// counts as growth.
const COLD_START_UP_FLOOR: u64 = 10;

/// Direction of recent star growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    /// Last 30 days grew more than 10% over the previous 30.
    Up,
    /// Last 30 days fell more than 10% below the previous 30.
    Down,
    /// Within the ±10% band.
    #[default]
    Stable,
}

impl TrendDirection {
    /// Returns the direction as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend statistics over the daily series.
///
/// Recomputed on every request from the corrected series; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Mean daily stars over the last 7 entries.
    pub avg_7d: f64,
    /// Mean daily stars over the last 30 entries.
    pub avg_30d: f64,
    /// The day with the most observed stars (earliest wins ties).
    pub peak_day: DailyBucket,
    /// Current star velocity, defined as the 7-day average.
    pub velocity: f64,
    /// Growth classification of the last 30 days vs the 30 before.
    pub direction: TrendDirection,
    /// Percentage change of the cumulative total over the last 30 days.
    pub growth_rate_percent: f64,
}

impl TrendSummary {
    /// Derives trend statistics from a daily series.
    ///
    /// An empty series yields the zeroed default.
    #[must_use]
    pub fn from_daily(daily: &[DailyBucket]) -> Self {
        let Some(last) = daily.last() else {
            return Self::default();
        };

        let avg_7d = tail_mean(daily, 7);
        let avg_30d = tail_mean(daily, 30);

        let mut peak = daily[0].clone();
        for bucket in &daily[1..] {
            if bucket.daily_count > peak.daily_count {
                peak = bucket.clone();
            }
        }

        let sum_30 = tail_sum(daily, 30);
        let prev_window = &daily[..daily.len() - daily.len().min(30)];
        let sum_prev_30 = tail_sum(prev_window, 30);
        let direction = classify_direction(sum_30, sum_prev_30);

        let window_base = if daily.len() > 30 {
            daily[daily.len() - 31].cumulative_count
        } else {
            0
        };
        let growth_rate_percent = if window_base == 0 {
            0.0
        } else {
            (last.cumulative_count as f64 - window_base as f64) / window_base as f64 * 100.0
        };

        Self {
            avg_7d,
            avg_30d,
            peak_day: peak,
            velocity: avg_7d,
            direction,
            growth_rate_percent,
        }
    }
}

/// Classifies growth from the last-30-day sum vs the preceding window's sum.
fn classify_direction(sum_30: u64, sum_prev_30: u64) -> TrendDirection {
    if sum_prev_30 == 0 {
        return if sum_30 > COLD_START_UP_FLOOR {
            TrendDirection::Up
        } else {
            TrendDirection::Stable
        };
    }

    let change = (sum_30 as f64 - sum_prev_30 as f64) / sum_prev_30 as f64;
    if change > DIRECTION_THRESHOLD {
        TrendDirection::Up
    } else if change < -DIRECTION_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Sum of daily counts over the last `n` entries.
fn tail_sum(daily: &[DailyBucket], n: usize) -> u64 {
    daily[daily.len() - daily.len().min(n)..]
        .iter()
        .map(|b| b.daily_count)
        .sum()
}

/// Mean of daily counts over the last `n` entries.
fn tail_mean(daily: &[DailyBucket], n: usize) -> f64 {
    let tail = &daily[daily.len() - daily.len().min(n)..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|b| b.daily_count).sum::<u64>() as f64 / tail.len() as f64
}
