//! Dense time-series construction and trend derivation.
//!
//! This crate builds the analytical output of stargauge:
//!
//! - [`SeriesBuilder`] - Buckets star events into gap-free daily and hourly
//!   series and applies the completeness correction
//! - [`StarSeries`] - The built series with observed totals
//! - [`TrendSummary`] - Averages, peak day, velocity, and growth direction

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod series;
mod trend;

pub use series::{DailyBucket, HourlyBucket, SeriesBuilder, StarSeries, TRAILING_WINDOW_DAYS};
pub use trend::{TrendDirection, TrendSummary};
