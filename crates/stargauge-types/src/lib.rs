//! Core types for the stargauge star-history analytics engine.
//!
//! This crate provides the fundamental data structures used throughout
//! stargauge:
//!
//! - [`RepoKey`] - Identifies one repository (`owner/name`)
//! - [`StarEvent`] - A single star with its timestamp and actor
//! - [`RepoSummary`] - Repository metadata needed before fetching stars
//! - [`PageOutcome`] - Classified result of fetching one stargazer page
//! - [`DayRange`] - Inclusive calendar range with day and hour iteration

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod day_range;
mod error;
mod event;
mod repo;

pub use day_range::{DayIterator, DayRange, HourIterator};
pub use error::{DayRangeError, RepoKeyParseError, Result, StargaugeError};
pub use event::{PageOutcome, StarEvent};
pub use repo::{RepoKey, RepoSummary};

/// Number of items per upstream page. The GitHub API caps `per_page` at 100.
pub const PAGE_SIZE: u32 = 100;
