//! Scripted [`StarSource`] for orchestrator and engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use stargauge_fetch::FetchError;
use stargauge_types::{PageOutcome, RepoKey, RepoSummary, StarEvent};

use crate::source::StarSource;

/// How the scripted summary call behaves.
enum SummaryScript {
    Ok(RepoSummary),
    Unavailable,
    RateLimited,
}

/// An in-memory source with per-page scripted outcomes and call counters.
///
/// Unscripted pages return an empty successful page, so tests only spell out
/// the pages they care about.
pub(crate) struct MockSource {
    summary: SummaryScript,
    pages: HashMap<u32, PageOutcome>,
    quota: u64,
    broken_quota: bool,
    page_calls: AtomicUsize,
    quota_calls: AtomicUsize,
}

impl MockSource {
    pub(crate) fn new(summary: RepoSummary) -> Self {
        Self {
            summary: SummaryScript::Ok(summary),
            pages: HashMap::new(),
            quota: 5000,
            broken_quota: false,
            page_calls: AtomicUsize::new(0),
            quota_calls: AtomicUsize::new(0),
        }
    }

    /// A source where each listed page yields one event.
    pub(crate) fn with_event_pages(pages: &[u32]) -> Self {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let starred = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();

        let mut source = Self::new(RepoSummary::new(pages.len() as u64, created));
        for &page in pages {
            source.pages.insert(
                page,
                PageOutcome::Events(vec![StarEvent::new(starred, format!("user{page}"))]),
            );
        }
        source
    }

    pub(crate) fn page_events(mut self, page: u32, events: Vec<StarEvent>) -> Self {
        self.pages.insert(page, PageOutcome::Events(events));
        self
    }

    pub(crate) fn failing_page(mut self, page: u32) -> Self {
        self.pages.insert(page, PageOutcome::Failed);
        self
    }

    pub(crate) fn rate_limited_page(mut self, page: u32) -> Self {
        self.pages.insert(page, PageOutcome::RateLimited);
        self
    }

    pub(crate) const fn quota(mut self, remaining: u64) -> Self {
        self.quota = remaining;
        self
    }

    pub(crate) const fn broken_quota(mut self) -> Self {
        self.broken_quota = true;
        self
    }

    pub(crate) fn summary_unavailable(mut self) -> Self {
        self.summary = SummaryScript::Unavailable;
        self
    }

    pub(crate) fn summary_rate_limited(mut self) -> Self {
        self.summary = SummaryScript::RateLimited;
        self
    }

    pub(crate) fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn quota_calls(&self) -> usize {
        self.quota_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StarSource for MockSource {
    async fn summary(&self, _key: &RepoKey) -> Result<RepoSummary, FetchError> {
        match &self.summary {
            SummaryScript::Ok(summary) => Ok(*summary),
            SummaryScript::Unavailable => Err(FetchError::ServerError { status: 502 }),
            SummaryScript::RateLimited => Err(FetchError::RateLimited),
        }
    }

    async fn page(&self, _key: &RepoKey, page: u32) -> PageOutcome {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| PageOutcome::Events(Vec::new()))
    }

    async fn remaining_quota(&self) -> Result<u64, FetchError> {
        self.quota_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_quota {
            return Err(FetchError::ServerError { status: 500 });
        }
        Ok(self.quota)
    }
}
