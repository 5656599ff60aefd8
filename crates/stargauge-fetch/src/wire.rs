//! Wire format for GitHub API responses.
//!
//! Only the fields stargauge actually consumes are modeled; everything else
//! in the upstream payloads is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use stargauge_types::{RepoSummary, StarEvent};

/// Subset of the `GET /repos/{owner}/{repo}` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct RepoInfo {
    pub(crate) stargazers_count: u64,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<RepoInfo> for RepoSummary {
    fn from(info: RepoInfo) -> Self {
        Self::new(info.stargazers_count, info.created_at)
    }
}

/// One entry of a stargazer page fetched with the
/// `application/vnd.github.star+json` media type, which includes the
/// `starred_at` timestamp alongside the user record.
#[derive(Debug, Deserialize)]
pub(crate) struct StarRecord {
    pub(crate) starred_at: DateTime<Utc>,
    pub(crate) user: UserRecord,
}

/// Subset of a user record.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    pub(crate) login: String,
}

impl From<StarRecord> for StarEvent {
    fn from(record: StarRecord) -> Self {
        Self::new(record.starred_at, record.user.login)
    }
}

/// Subset of the `GET /rate_limit` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitBody {
    pub(crate) resources: RateLimitResources,
}

/// Per-resource quota buckets; only the core REST bucket matters here.
#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitResources {
    pub(crate) core: QuotaBucket,
}

/// Remaining quota for one resource bucket.
#[derive(Debug, Deserialize)]
pub(crate) struct QuotaBucket {
    pub(crate) remaining: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_repo_info() {
        let body = r#"{
            "id": 724712,
            "full_name": "rust-lang/rust",
            "stargazers_count": 95000,
            "created_at": "2010-06-16T20:39:03Z",
            "forks_count": 12000
        }"#;

        let info: RepoInfo = serde_json::from_str(body).unwrap();
        let summary: RepoSummary = info.into();
        assert_eq!(summary.total_stars, 95000);
        assert_eq!(
            summary.created_at,
            Utc.with_ymd_and_hms(2010, 6, 16, 20, 39, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_star_page() {
        let body = r#"[
            {"starred_at": "2024-01-02T10:00:00Z", "user": {"login": "alice", "id": 1}},
            {"starred_at": "2024-01-02T11:00:00Z", "user": {"login": "bob", "id": 2}}
        ]"#;

        let records: Vec<StarRecord> = serde_json::from_str(body).unwrap();
        let events: Vec<StarEvent> = records.into_iter().map(Into::into).collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].user, "alice");
        assert_eq!(
            events[1].starred_at,
            Utc.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_rate_limit() {
        let body = r#"{
            "resources": {
                "core": {"limit": 5000, "used": 4850, "remaining": 150, "reset": 1717000000},
                "search": {"limit": 30, "used": 0, "remaining": 30, "reset": 1717000000}
            },
            "rate": {"limit": 5000, "used": 4850, "remaining": 150, "reset": 1717000000}
        }"#;

        let parsed: RateLimitBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.resources.core.remaining, 150);
    }
}
