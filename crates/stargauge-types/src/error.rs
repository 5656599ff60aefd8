//! Error types for stargauge.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for stargauge operations.
pub type Result<T> = std::result::Result<T, StargaugeError>;

/// Errors surfaced to callers of the analytics engine.
///
/// Only two conditions abort an analysis: the summary fetch failing (there is
/// nothing to bucket without `created_at` and the reported total) and the
/// summary fetch being rejected for quota reasons. Everything else degrades
/// to a partial result reported through `data_completeness`.
#[derive(Error, Debug)]
pub enum StargaugeError {
    /// The upstream host could not be reached or rejected the summary call.
    #[error("Upstream unavailable for {repo}: {reason}")]
    UpstreamUnavailable {
        /// The repository slug being analyzed.
        repo: String,
        /// What went wrong.
        reason: String,
    },

    /// The upstream rate limit was already exhausted before any data could
    /// be fetched.
    #[error("Rate limit exceeded while fetching {repo}")]
    RateLimitExceeded {
        /// The repository slug being analyzed.
        repo: String,
    },

    /// A repository slug could not be parsed.
    #[error(transparent)]
    RepoKey(#[from] RepoKeyParseError),

    /// An invalid calendar range was constructed.
    #[error(transparent)]
    DayRange(#[from] DayRangeError),
}

/// Error for repository slugs that are not of the form `owner/name`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid repository slug '{slug}': expected owner/name")]
pub struct RepoKeyParseError {
    /// The slug that failed to parse.
    pub slug: String,
}

impl RepoKeyParseError {
    /// Creates a new parse error for the given slug.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

/// Error for invalid calendar ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DayRangeError {
    /// Start date is after end date.
    #[error("Invalid day range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}
