//! In-memory TTL cache for fetched star events.
//!
//! One [`EventCache`] instance lives for the process lifetime and is handed
//! to the engine explicitly; there is no ambient singleton. Writes replace
//! the whole entry for a key (last writer wins), so readers never observe a
//! partially updated collection. Concurrent misses for the same key are not
//! deduplicated; the redundant fetches race benignly on the final `put`.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use stargauge_types::{RepoKey, StarEvent};
use tracing::debug;

/// Default entry lifetime: one week.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// One cached fetch result.
///
/// The event list is shared behind an [`Arc`] so a cache hit hands the
/// caller a cheap handle instead of cloning thousands of events.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// When the fetch that produced these events completed.
    pub fetched_at: DateTime<Utc>,
    /// The fetched events, in upstream page order.
    pub events: Arc<[StarEvent]>,
}

impl CacheEntry {
    /// Returns the entry age relative to `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Process-wide store of fetched star-event collections.
#[derive(Debug)]
pub struct EventCache {
    ttl: Duration,
    entries: RwLock<HashMap<RepoKey, CacheEntry>>,
}

impl EventCache {
    /// Creates a cache with the given entry lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a cache with the default one-week lifetime.
    #[must_use]
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Returns the configured entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached entry for `key` if it is still fresh.
    ///
    /// Stale entries read as misses. They are left in place and overwritten
    /// by the next successful [`put`](Self::put); there is no eager eviction.
    #[must_use]
    pub fn get(&self, key: &RepoKey) -> Option<CacheEntry> {
        self.get_at(key, Utc::now())
    }

    /// Stores a freshly fetched collection for `key`, replacing any previous
    /// entry wholesale.
    pub fn put(&self, key: RepoKey, events: Vec<StarEvent>) {
        self.put_at(key, events, Utc::now());
    }

    /// Returns the number of entries currently held, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freshness check against an explicit clock; the seam the tests use.
    fn get_at(&self, key: &RepoKey, now: DateTime<Utc>) -> Option<CacheEntry> {
        let entries = self.entries.read().expect("cache lock poisoned");
        let entry = entries.get(key)?;

        if entry.age(now) < self.ttl {
            debug!(repo = %key, events = entry.events.len(), "cache hit");
            Some(entry.clone())
        } else {
            debug!(repo = %key, "cache entry stale, treating as miss");
            None
        }
    }

    fn put_at(&self, key: RepoKey, events: Vec<StarEvent>, now: DateTime<Utc>) {
        let entry = CacheEntry {
            fetched_at: now,
            events: events.into(),
        };
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key, entry);
    }
}

impl Default for EventCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_events() -> Vec<StarEvent> {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        vec![StarEvent::new(at, "alice"), StarEvent::new(at, "bob")]
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = EventCache::with_default_ttl();
        assert!(cache.get(&RepoKey::new("o", "r")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let cache = EventCache::with_default_ttl();
        let key = RepoKey::new("o", "r");

        cache.put(key.clone(), sample_events());

        let entry = cache.get(&key).unwrap();
        assert_eq!(entry.events.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_entry_is_a_miss() {
        let cache = EventCache::new(Duration::from_secs(60));
        let key = RepoKey::new("o", "r");
        let fetched = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        cache.put_at(key.clone(), sample_events(), fetched);

        let fresh = fetched + chrono::TimeDelta::seconds(59);
        assert!(cache.get_at(&key, fresh).is_some());

        let stale = fetched + chrono::TimeDelta::seconds(61);
        assert!(cache.get_at(&key, stale).is_none());
        // Stale entries stay put until overwritten
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_replaces_wholesale() {
        let cache = EventCache::with_default_ttl();
        let key = RepoKey::new("o", "r");

        cache.put(key.clone(), sample_events());
        cache.put(key.clone(), Vec::new());

        let entry = cache.get(&key).unwrap();
        assert!(entry.events.is_empty());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = EventCache::with_default_ttl();
        cache.put(RepoKey::new("a", "x"), sample_events());

        assert!(cache.get(&RepoKey::new("a", "y")).is_none());
        assert!(cache.get(&RepoKey::new("a", "x")).is_some());
    }
}
