//! Repository identity and summary metadata.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RepoKeyParseError;

/// Identifies one repository on the upstream host.
///
/// A `RepoKey` is the cache key for star-event collections: two requests for
/// the same `owner/name` pair share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{owner}/{name}")]
pub struct RepoKey {
    /// Repository owner (user or organization login).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoKey {
    /// Creates a new repository key.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoKey {
    type Err = RepoKeyParseError;

    /// Parses an `owner/name` slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(RepoKeyParseError::new(s)),
        }
    }
}

/// Repository metadata fetched ahead of the star pages.
///
/// The reported star total drives the sampling plan and the completeness
/// correction; the creation date anchors the dense daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Total stars as reported by the upstream host.
    pub total_stars: u64,
    /// When the repository was created (UTC).
    pub created_at: DateTime<Utc>,
}

impl RepoSummary {
    /// Creates a new summary.
    #[must_use]
    pub const fn new(total_stars: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            total_stars,
            created_at,
        }
    }
}
