//! Star-history analytics for GitHub repositories.
//!
//! This is a facade crate that re-exports functionality from the stargauge
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use stargauge_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::with_defaults()?;
//!     let engine = StarEngine::new(client);
//!
//!     let key: RepoKey = "rust-lang/rust".parse()?;
//!     let analytics = engine.analyze(&key, false).await?;
//!     println!(
//!         "{}: {} stars, {:.1}/day, trending {}",
//!         analytics.repo, analytics.total_stars, analytics.avg_per_day,
//!         analytics.trends.direction,
//!     );
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use stargauge_types::*;

// Re-export the API client
pub use stargauge_fetch::{ClientConfig, FetchError, GitHubClient};

// Re-export the event cache
pub use stargauge_cache::{CacheEntry, DEFAULT_TTL, EventCache};

// Re-export series construction
pub use stargauge_aggregate::{
    DailyBucket, HourlyBucket, SeriesBuilder, StarSeries, TrendDirection, TrendSummary,
};

// Re-export the engine
pub use stargauge_engine::{
    BATCH_SIZE, FetchReport, QuotaGuard, StarAnalytics, StarEngine, StarSource, fetch_all_pages,
    plan_pages,
};

/// Prelude module for convenient imports.
///
/// ```
/// use stargauge_lib::prelude::*;
/// ```
pub mod prelude {
    pub use stargauge_types::{
        PAGE_SIZE, PageOutcome, RepoKey, RepoSummary, Result, StarEvent, StargaugeError,
    };

    pub use stargauge_fetch::{ClientConfig, GitHubClient};

    pub use stargauge_cache::EventCache;

    pub use stargauge_aggregate::{SeriesBuilder, StarSeries, TrendDirection, TrendSummary};

    pub use stargauge_engine::{QuotaGuard, StarAnalytics, StarEngine, plan_pages};
}
