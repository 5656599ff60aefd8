//! Concurrent batched page fetching with rate-budget checks.

use futures::future::join_all;
use stargauge_types::{PageOutcome, RepoKey, StarEvent};
use tracing::{debug, warn};

use crate::source::StarSource;

/// Pages fetched concurrently per batch.
pub const BATCH_SIZE: usize = 10;

/// Decides whether fetching may continue once a rate-limit signal appears.
///
/// The guard is only consulted after a batch reports a rate-limited page, so
/// at most one quota request is spent per affected batch.
#[derive(Debug, Clone, Copy)]
pub struct QuotaGuard {
    floor: u64,
}

impl QuotaGuard {
    /// Default safety floor: stop when fewer than 10 requests remain.
    pub const DEFAULT_FLOOR: u64 = 10;

    /// Creates a guard with the given safety floor.
    #[must_use]
    pub const fn new(floor: u64) -> Self {
        Self { floor }
    }

    /// Returns true if the remaining quota allows another batch.
    #[must_use]
    pub const fn should_continue(&self, remaining: u64) -> bool {
        remaining >= self.floor
    }
}

impl Default for QuotaGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FLOOR)
    }
}

/// What a batched fetch run gathered.
///
/// Never an error: pages that failed or were rate-limited simply contribute
/// nothing, and `quota_exhausted` records whether the run stopped early.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// All events gathered, in no particular order.
    pub events: Vec<StarEvent>,
    /// Pages that returned events.
    pub pages_fetched: usize,
    /// Pages skipped because of rate limiting or errors.
    pub pages_skipped: usize,
    /// True if the run stopped before exhausting the plan because the
    /// remaining quota fell below the guard's floor.
    pub quota_exhausted: bool,
}

/// Fetches every planned page in fixed-size concurrent batches.
///
/// Each batch is issued in parallel and awaited as a whole. When any page in
/// a batch comes back rate-limited, the remaining quota is checked once; if
/// it sits below the guard's floor the run stops and returns what it has.
/// Individual page failures are logged and skipped, never fatal.
pub async fn fetch_all_pages<S: StarSource + ?Sized>(
    source: &S,
    key: &RepoKey,
    plan: &[u32],
    guard: &QuotaGuard,
) -> FetchReport {
    let mut report = FetchReport::default();

    for batch in plan.chunks(BATCH_SIZE) {
        let outcomes = join_all(batch.iter().map(|&page| source.page(key, page))).await;

        let mut hit_limit = false;
        for outcome in outcomes {
            match outcome {
                PageOutcome::Events(events) => {
                    report.pages_fetched += 1;
                    report.events.extend(events);
                }
                PageOutcome::RateLimited => {
                    report.pages_skipped += 1;
                    hit_limit = true;
                }
                PageOutcome::Failed => {
                    report.pages_skipped += 1;
                }
            }
        }

        if hit_limit {
            match source.remaining_quota().await {
                Ok(remaining) if guard.should_continue(remaining) => {
                    debug!(repo = %key, remaining, "rate limit hit but quota remains, continuing");
                }
                Ok(remaining) => {
                    warn!(
                        repo = %key,
                        remaining,
                        events = report.events.len(),
                        "quota below safety floor, returning partial result"
                    );
                    report.quota_exhausted = true;
                    break;
                }
                Err(e) => {
                    warn!(repo = %key, error = %e, "quota check failed, stopping fetch");
                    report.quota_exhausted = true;
                    break;
                }
            }
        }
    }

    report
}
