//! Star-history aggregation engine.
//!
//! This crate ties the workspace together:
//!
//! - [`plan_pages`] - Decides which pages to fetch (full scan vs sampling)
//! - [`QuotaGuard`] - Decides whether fetching may continue after a
//!   rate-limit signal
//! - [`fetch_all_pages`] - Drives the plan in fixed-size concurrent batches
//! - [`StarSource`] - Seam over the upstream API, implemented for
//!   [`GitHubClient`](stargauge_fetch::GitHubClient)
//! - [`StarEngine`] - Cache-aware entry point producing [`StarAnalytics`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod batch;
mod engine;
mod plan;
mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BATCH_SIZE, FetchReport, QuotaGuard, fetch_all_pages};
pub use engine::{StarAnalytics, StarEngine};
pub use plan::{HEAD_PAGES, MAX_SAMPLED_PAGES, TAIL_PAGES, plan_pages};
pub use source::StarSource;
