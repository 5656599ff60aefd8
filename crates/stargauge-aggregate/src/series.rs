//! Dense daily and hourly series construction.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use stargauge_types::{DayRange, StarEvent};

use crate::trend::TrendSummary;

/// Length of the trailing window covered by the hourly series, in days.
pub const TRAILING_WINDOW_DAYS: i64 = 7;

/// Star activity for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// The calendar day (UTC).
    pub date: NaiveDate,
    /// Stars observed on this day.
    pub daily_count: u64,
    /// Running total through this day, corrected against the reported total
    /// when only a sample was fetched.
    pub cumulative_count: u64,
}

impl DailyBucket {
    /// Creates a new daily bucket.
    #[must_use]
    pub const fn new(date: NaiveDate, daily_count: u64, cumulative_count: u64) -> Self {
        Self {
            date,
            daily_count,
            cumulative_count,
        }
    }
}

/// Star activity for one hour of the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    /// Start of the hour (UTC).
    pub hour: DateTime<Utc>,
    /// Stars observed during this hour.
    pub count: u64,
}

/// The complete built series for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSeries {
    /// One bucket per day, creation through today, no gaps.
    pub daily: Vec<DailyBucket>,
    /// One bucket per hour over the trailing window, no gaps.
    pub hourly: Vec<HourlyBucket>,
    /// Events actually observed (before correction).
    pub observed_total: u64,
    /// Observed coverage of the reported total, as a percentage.
    pub data_completeness: f64,
    /// Derived trend statistics.
    pub trends: TrendSummary,
}

/// Builds dense series from a set of dated star events.
///
/// The output is wholly determined by `(created_at, today, reported_total)`
/// and the event set; bucketing aggregates by day key, so the order events
/// arrive in is irrelevant.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder {
    created_at: NaiveDate,
    today: NaiveDate,
    reported_total: u64,
}

impl SeriesBuilder {
    /// Creates a builder for the given calendar window and reported total.
    ///
    /// A creation date in the future (upstream clock skew) is clamped to
    /// `today` so the daily range stays valid.
    #[must_use]
    pub fn new(created_at: NaiveDate, today: NaiveDate, reported_total: u64) -> Self {
        Self {
            created_at: created_at.min(today),
            today,
            reported_total,
        }
    }

    /// Buckets the events into dense daily and hourly series, applies the
    /// completeness correction, and derives trends.
    #[must_use]
    pub fn build(&self, events: &[StarEvent]) -> StarSeries {
        let (day_counts, hour_counts) = self.bucket(events);

        let mut daily = self.dense_daily(&day_counts);
        let hourly = self.dense_hourly(&hour_counts);

        let observed_total = daily.last().map_or(0, |b| b.cumulative_count);
        let data_completeness = self.correct_for_completeness(&mut daily, observed_total);
        let trends = TrendSummary::from_daily(&daily);

        StarSeries {
            daily,
            hourly,
            observed_total,
            data_completeness,
            trends,
        }
    }

    /// Aggregates events by day key, and by hour key inside the trailing
    /// window.
    fn bucket(
        &self,
        events: &[StarEvent],
    ) -> (HashMap<NaiveDate, u64>, HashMap<DateTime<Utc>, u64>) {
        let window = self.trailing_window();
        let mut day_counts: HashMap<NaiveDate, u64> = HashMap::new();
        let mut hour_counts: HashMap<DateTime<Utc>, u64> = HashMap::new();

        for event in events {
            let day = event.starred_at.date_naive();
            // Events outside the calendar window (clock skew, drifted totals)
            // would break the dense-range invariant; drop them.
            if day < self.created_at || day > self.today {
                continue;
            }
            *day_counts.entry(day).or_insert(0) += 1;

            if window.contains(day) {
                *hour_counts.entry(truncate_to_hour(event.starred_at)).or_insert(0) += 1;
            }
        }

        (day_counts, hour_counts)
    }

    /// One entry per day from creation through today, zero-filled, with a
    /// running cumulative total.
    fn dense_daily(&self, day_counts: &HashMap<NaiveDate, u64>) -> Vec<DailyBucket> {
        let range = DayRange {
            start: self.created_at,
            end: self.today,
        };

        let mut cumulative = 0u64;
        range
            .days()
            .map(|date| {
                let daily_count = day_counts.get(&date).copied().unwrap_or(0);
                cumulative += daily_count;
                DailyBucket::new(date, daily_count, cumulative)
            })
            .collect()
    }

    /// One entry per hour across the trailing window, zero-filled.
    fn dense_hourly(&self, hour_counts: &HashMap<DateTime<Utc>, u64>) -> Vec<HourlyBucket> {
        self.trailing_window()
            .hours()
            .map(|hour| HourlyBucket {
                hour,
                count: hour_counts.get(&hour).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Scales cumulative counts so the final total matches the reported one.
    ///
    /// Under partial sampling the observed events undercount reality. The
    /// daily counts keep the observed sample shape; only the cumulative
    /// curve is reconciled. Returns the completeness percentage.
    fn correct_for_completeness(&self, daily: &mut [DailyBucket], observed_total: u64) -> f64 {
        if self.reported_total == 0 {
            return 100.0;
        }

        let completeness = observed_total as f64 / self.reported_total as f64 * 100.0;

        if observed_total > 0 && observed_total < self.reported_total {
            let factor = self.reported_total as f64 / observed_total as f64;
            for bucket in daily.iter_mut() {
                bucket.cumulative_count = (bucket.cumulative_count as f64 * factor).round() as u64;
            }
        }

        completeness
    }

    /// The inclusive day window the hourly series covers.
    fn trailing_window(&self) -> DayRange {
        DayRange {
            start: self.today - chrono::TimeDelta::days(TRAILING_WINDOW_DAYS),
            end: self.today,
        }
    }
}

/// Truncates a timestamp to the start of its hour.
fn truncate_to_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    use chrono::Timelike;
    Utc.with_ymd_and_hms(dt.year(), dt.month(), dt.day(), dt.hour(), 0, 0)
        .unwrap()
}
