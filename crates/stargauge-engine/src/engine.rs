//! Cache-aware analytics engine.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use stargauge_aggregate::{DailyBucket, HourlyBucket, SeriesBuilder, TrendSummary};
use stargauge_cache::EventCache;
use stargauge_fetch::FetchError;
use stargauge_types::{RepoKey, RepoSummary, Result, StarEvent, StargaugeError};
use tracing::{debug, info};

use crate::batch::{QuotaGuard, fetch_all_pages};
use crate::plan::plan_pages;
use crate::source::StarSource;

/// Days of daily history echoed back as `recent_activity`.
const RECENT_DAYS: usize = 30;

/// The complete analytics response for one repository.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarAnalytics {
    /// The analyzed repository slug.
    pub repo: String,
    /// Total stars as reported by the upstream host.
    pub total_stars: u64,
    /// When the repository was created.
    pub created_at: DateTime<Utc>,
    /// Repository age in whole days.
    pub age_in_days: u64,
    /// Reported stars divided by age.
    pub avg_per_day: f64,
    /// Dense daily series, creation through today.
    pub daily_history: Vec<DailyBucket>,
    /// Dense hourly series over the trailing week.
    pub hourly_activity: Vec<HourlyBucket>,
    /// Derived trend statistics.
    pub trends: TrendSummary,
    /// The last 30 entries of `daily_history`.
    pub recent_activity: Vec<DailyBucket>,
    /// Observed coverage of the reported total, as a percentage. Below 100
    /// when sampling or rate limiting left gaps; never an error.
    pub data_completeness: f64,
}

/// The star-history aggregation engine.
///
/// Holds the upstream source, the process-wide event cache, and the rate
/// budget guard. Each call to [`analyze`](Self::analyze) is an independent
/// task; the cache is the only shared mutable state, and its writes are
/// whole-entry replacements.
#[derive(Debug)]
pub struct StarEngine<S> {
    source: S,
    cache: EventCache,
    guard: QuotaGuard,
}

impl<S: StarSource> StarEngine<S> {
    /// Creates an engine with the default cache TTL and quota floor.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_parts(source, EventCache::with_default_ttl(), QuotaGuard::default())
    }

    /// Creates an engine from explicit parts.
    #[must_use]
    pub const fn with_parts(source: S, cache: EventCache, guard: QuotaGuard) -> Self {
        Self {
            source,
            cache,
            guard,
        }
    }

    /// Returns the event cache.
    #[must_use]
    pub const fn cache(&self) -> &EventCache {
        &self.cache
    }

    /// Returns the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Computes star analytics for one repository.
    ///
    /// `full_scan` requests every page regardless of collection size and
    /// bypasses the cache read (the fresh result is still stored).
    ///
    /// # Errors
    ///
    /// Fails with [`StargaugeError::UpstreamUnavailable`] when the summary
    /// fetch fails and [`StargaugeError::RateLimitExceeded`] when the quota
    /// is already exhausted before any data could be fetched. Quota running
    /// out mid-fetch is not an error; it shows up as `data_completeness`
    /// below 100.
    pub async fn analyze(&self, key: &RepoKey, full_scan: bool) -> Result<StarAnalytics> {
        self.analyze_at(key, full_scan, Utc::now().date_naive()).await
    }

    /// Clock-injected body of [`analyze`](Self::analyze).
    async fn analyze_at(
        &self,
        key: &RepoKey,
        full_scan: bool,
        today: NaiveDate,
    ) -> Result<StarAnalytics> {
        let summary = self.source.summary(key).await.map_err(|e| match e {
            FetchError::RateLimited => StargaugeError::RateLimitExceeded {
                repo: key.to_string(),
            },
            other => StargaugeError::UpstreamUnavailable {
                repo: key.to_string(),
                reason: other.to_string(),
            },
        })?;

        let cached = if full_scan { None } else { self.cache.get(key) };
        let events: Arc<[StarEvent]> = match cached {
            Some(entry) => {
                debug!(repo = %key, events = entry.events.len(), "serving events from cache");
                entry.events
            }
            None => {
                let plan = plan_pages(summary.total_stars, full_scan);
                debug!(repo = %key, pages = plan.len(), full_scan, "fetching star pages");

                let report = fetch_all_pages(&self.source, key, &plan, &self.guard).await;
                if report.quota_exhausted {
                    info!(
                        repo = %key,
                        fetched = report.pages_fetched,
                        planned = plan.len(),
                        "fetch stopped early on rate budget, proceeding with partial data"
                    );
                }

                self.cache.put(key.clone(), report.events.clone());
                report.events.into()
            }
        };

        let series = SeriesBuilder::new(summary.created_at.date_naive(), today, summary.total_stars)
            .build(&events);
        Ok(assemble(key, &summary, today, series))
    }
}

/// Shapes a built series into the response payload.
fn assemble(
    key: &RepoKey,
    summary: &RepoSummary,
    today: NaiveDate,
    series: stargauge_aggregate::StarSeries,
) -> StarAnalytics {
    let age_in_days = (today - summary.created_at.date_naive()).num_days().max(0) as u64;
    let avg_per_day = summary.total_stars as f64 / age_in_days.max(1) as f64;

    let recent_start = series.daily.len().saturating_sub(RECENT_DAYS);
    let recent_activity = series.daily[recent_start..].to_vec();

    StarAnalytics {
        repo: key.to_string(),
        total_stars: summary.total_stars,
        created_at: summary.created_at,
        age_in_days,
        avg_per_day,
        daily_history: series.daily,
        hourly_activity: series.hourly,
        trends: series.trends,
        recent_activity,
        data_completeness: series.data_completeness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSource;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn key() -> RepoKey {
        RepoKey::new("owner", "repo")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary(total: u64) -> RepoSummary {
        RepoSummary::new(total, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn event(d: u32, h: u32) -> StarEvent {
        StarEvent::new(Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap(), "user")
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let source = MockSource::new(summary(2)).page_events(1, vec![event(2, 10), event(2, 11)]);
        let engine = StarEngine::new(source);

        let analytics = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(analytics.repo, "owner/repo");
        assert_eq!(analytics.total_stars, 2);
        assert_eq!(analytics.age_in_days, 2);
        assert_eq!(analytics.daily_history.len(), 3);
        assert_eq!(analytics.daily_history[0], DailyBucket::new(date(2024, 1, 1), 0, 0));
        assert_eq!(analytics.daily_history[1], DailyBucket::new(date(2024, 1, 2), 2, 2));
        assert_eq!(analytics.daily_history[2], DailyBucket::new(date(2024, 1, 3), 0, 2));
        assert_relative_eq!(analytics.data_completeness, 100.0);
        assert_eq!(analytics.hourly_activity.len(), 8 * 24);
        assert_eq!(analytics.recent_activity, analytics.daily_history);
    }

    #[tokio::test]
    async fn test_analyze_partial_data_is_corrected() {
        let source = MockSource::new(summary(4)).page_events(1, vec![event(2, 10)]);
        let engine = StarEngine::new(source);

        let analytics = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();

        assert_relative_eq!(analytics.data_completeness, 25.0);
        assert_eq!(analytics.daily_history[1].cumulative_count, 4);
        assert_eq!(analytics.daily_history[1].daily_count, 1);
        assert_eq!(analytics.daily_history[2].cumulative_count, 4);
    }

    #[tokio::test]
    async fn test_second_analyze_hits_cache() {
        let source = MockSource::new(summary(2)).page_events(1, vec![event(2, 10), event(2, 11)]);
        let engine = StarEngine::new(source);

        let first = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();
        let calls_after_first = engine.source().page_calls();

        let second = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(engine.source().page_calls(), calls_after_first);
        assert_eq!(first.daily_history, second.daily_history);
    }

    #[tokio::test]
    async fn test_full_scan_bypasses_cache_read() {
        let source = MockSource::new(summary(2)).page_events(1, vec![event(2, 10), event(2, 11)]);
        let engine = StarEngine::new(source);

        engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();
        let calls_after_first = engine.source().page_calls();

        engine
            .analyze_at(&key(), true, date(2024, 1, 3))
            .await
            .unwrap();

        assert!(engine.source().page_calls() > calls_after_first);
    }

    #[tokio::test]
    async fn test_quota_exhaustion_yields_partial_result() {
        // 2000 stars -> 20 planned pages in two batches
        let mut source = MockSource::new(summary(2000));
        for page in 1..=10 {
            source = source.page_events(page, vec![event(2, 10)]);
        }
        let source = source.rate_limited_page(11).quota(3);
        let engine = StarEngine::new(source);

        let analytics = engine
            .analyze_at(&key(), false, date(2024, 1, 5))
            .await
            .unwrap();

        assert!(analytics.data_completeness < 100.0);
        assert_eq!(engine.source().quota_calls(), 1);
        // The reported total still anchors the response
        assert_eq!(analytics.total_stars, 2000);
    }

    #[tokio::test]
    async fn test_summary_failure_is_fatal() {
        let source = MockSource::new(summary(2)).summary_unavailable();
        let engine = StarEngine::new(source);

        let err = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap_err();

        assert!(matches!(err, StargaugeError::UpstreamUnavailable { .. }));
        assert_eq!(engine.source().page_calls(), 0);
    }

    #[tokio::test]
    async fn test_summary_rate_limit_surfaces_as_error() {
        let source = MockSource::new(summary(2)).summary_rate_limited();
        let engine = StarEngine::new(source);

        let err = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap_err();

        assert!(matches!(err, StargaugeError::RateLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn test_recent_activity_is_last_thirty_days() {
        let source = MockSource::new(RepoSummary::new(
            0,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        ));
        let engine = StarEngine::new(source);

        let analytics = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(analytics.recent_activity.len(), 30);
        assert_eq!(
            analytics.recent_activity.last().unwrap().date,
            date(2024, 1, 3)
        );
    }

    #[tokio::test]
    async fn test_zero_star_repository() {
        let source = MockSource::new(summary(0));
        let engine = StarEngine::new(source);

        let analytics = engine
            .analyze_at(&key(), false, date(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(engine.source().page_calls(), 0);
        assert_eq!(analytics.daily_history.len(), 3);
        assert_relative_eq!(analytics.data_completeness, 100.0);
    }
}
