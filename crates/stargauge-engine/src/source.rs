//! Upstream abstraction consumed by the orchestrator and engine.

use async_trait::async_trait;
use stargauge_fetch::{FetchError, GitHubClient};
use stargauge_types::{PageOutcome, RepoKey, RepoSummary};

/// The paginated upstream collection the engine aggregates.
///
/// Three operations cover everything the engine needs: the collection
/// summary (reported total and creation date), one classified page of
/// events, and the remaining request quota. Production uses
/// [`GitHubClient`]; tests script their own sources.
#[async_trait]
pub trait StarSource: Send + Sync {
    /// Fetches the collection summary.
    async fn summary(&self, key: &RepoKey) -> Result<RepoSummary, FetchError>;

    /// Fetches one page of star events, classified.
    async fn page(&self, key: &RepoKey, page: u32) -> PageOutcome;

    /// Fetches the remaining request quota.
    async fn remaining_quota(&self) -> Result<u64, FetchError>;
}

#[async_trait]
impl StarSource for GitHubClient {
    async fn summary(&self, key: &RepoKey) -> Result<RepoSummary, FetchError> {
        Self::summary(self, key).await
    }

    async fn page(&self, key: &RepoKey, page: u32) -> PageOutcome {
        self.star_page(key, page).await
    }

    async fn remaining_quota(&self) -> Result<u64, FetchError> {
        Self::remaining_quota(self).await
    }
}
