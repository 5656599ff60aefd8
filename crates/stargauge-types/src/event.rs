//! Star event representation and page fetch classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single star event: one user starring the repository at one instant.
///
/// Events are immutable once fetched. The timestamp carries all information
/// the series builder needs; the actor login is kept for display and
/// de-duplication by callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarEvent {
    /// When the star was given (UTC).
    pub starred_at: DateTime<Utc>,
    /// Login of the user who starred.
    pub user: String,
}

impl StarEvent {
    /// Creates a new star event.
    #[must_use]
    pub fn new(starred_at: DateTime<Utc>, user: impl Into<String>) -> Self {
        Self {
            starred_at,
            user: user.into(),
        }
    }
}

/// Classified result of fetching one page of star events.
///
/// A page either yields events, reports that the upstream rate limit was hit,
/// or fails outright. Rate-limited and failed pages contribute zero events to
/// the aggregate; only the rate-limited classification feeds back into the
/// batch orchestrator's decision to keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched successfully.
    Events(Vec<StarEvent>),
    /// The upstream refused the request because the rate limit is exhausted.
    RateLimited,
    /// The page fetch failed for a non-rate-limit reason.
    Failed,
}

impl PageOutcome {
    /// Returns true if this outcome is the rate-limited classification.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Returns the number of events carried by this outcome.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Events(events) => events.len(),
            Self::RateLimited | Self::Failed => 0,
        }
    }

    /// Returns true if this outcome carries no events.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
