//! HTTP client for the GitHub REST API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header};
use stargauge_types::{PAGE_SIZE, PageOutcome, RepoKey, RepoSummary, StarEvent};
use thiserror::Error;
use tracing::{debug, warn};

use crate::wire;

/// Media type that makes the stargazers endpoint include `starred_at`.
const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";

/// Media type for all other REST calls.
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Configuration for the GitHub client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (overridable for tests against a local server).
    pub api_base: String,
    /// Personal access token, sent as a bearer credential when present.
    pub token: Option<String>,
    /// Connection pool size per host.
    pub pool_size: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string. GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
            pool_size: 10, // Matches the batch width used by the orchestrator
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("stargauge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while talking to the upstream API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status after all retries.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The upstream rate limit is exhausted.
    #[error("Rate limit exhausted")]
    RateLimited,

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// GitHub API client with connection pooling and retry logic.
///
/// Retries cover transient transport failures and 5xx responses with
/// exponential backoff. Rate-limit rejections are never retried; they are
/// classified and handed back so the orchestrator can decide whether to keep
/// fetching.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: ClientConfig,
}

impl GitHubClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Keep one idle connection per in-flight batch slot
            .pool_max_idle_per_host(config.pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches repository metadata: the reported star total and creation date.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RateLimited`] when the quota is exhausted and an
    /// HTTP/server error for any other failure. There is no partial-result
    /// fallback here; analysis cannot proceed without the summary.
    pub async fn summary(&self, key: &RepoKey) -> Result<RepoSummary, FetchError> {
        let url = format!("{}/repos/{}/{}", self.config.api_base, key.owner, key.name);
        let response = self.get_with_retry(&url, JSON_MEDIA_TYPE).await?;

        let info: wire::RepoInfo = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(info.into())
    }

    /// Fetches one page of star events, classifying the outcome.
    ///
    /// Rate-limit rejections map to [`PageOutcome::RateLimited`]; any other
    /// failure (transport, server error, undecodable body) maps to
    /// [`PageOutcome::Failed`] and contributes zero events. Neither aborts
    /// the surrounding batch.
    pub async fn star_page(&self, key: &RepoKey, page: u32) -> PageOutcome {
        let url = format!(
            "{}/repos/{}/{}/stargazers?per_page={}&page={}",
            self.config.api_base, key.owner, key.name, PAGE_SIZE, page
        );

        match self.get_with_retry(&url, STAR_MEDIA_TYPE).await {
            Ok(response) => match response.json::<Vec<wire::StarRecord>>().await {
                Ok(records) => {
                    debug!(repo = %key, page, count = records.len(), "fetched star page");
                    PageOutcome::Events(records.into_iter().map(Into::into).collect())
                }
                Err(e) => {
                    warn!(repo = %key, page, error = %e, "undecodable star page, skipping");
                    PageOutcome::Failed
                }
            },
            Err(FetchError::RateLimited) => PageOutcome::RateLimited,
            Err(e) => {
                warn!(repo = %key, page, error = %e, "star page fetch failed, skipping");
                PageOutcome::Failed
            }
        }
    }

    /// Fetches the remaining request quota for the core REST bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the quota endpoint cannot be reached or decoded.
    pub async fn remaining_quota(&self) -> Result<u64, FetchError> {
        let url = format!("{}/rate_limit", self.config.api_base);
        let response = self.get_with_retry(&url, JSON_MEDIA_TYPE).await?;

        let body: wire::RateLimitBody = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(body.resources.core.remaining)
    }

    /// Issues a GET with retries on transient failures.
    ///
    /// Rate-limit rejections (403/429 with the quota header at zero) are
    /// returned immediately; retrying them only burns more quota.
    async fn get_with_retry(&self, url: &str, accept: &str) -> Result<Response, FetchError> {
        let mut attempts = 0;

        loop {
            match self.request(url, accept).send().await {
                Ok(response) => {
                    if is_rate_limit_rejection(&response) {
                        return Err(FetchError::RateLimited);
                    }

                    if response.status().is_server_error() {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(FetchError::ServerError {
                            status: response.status().as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    return Ok(response);
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Builds a request with the API media type and optional bearer token.
    fn request(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        // Cap at max delay
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Add jitter (±25%)
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            // Simple deterministic jitter based on attempt number
            // This avoids needing a random number generator
            let jitter_offset = (attempt as u64 * 17) % (jitter_range * 2);
            jitter_offset.saturating_sub(jitter_range)
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter as i64).max(100) as u64;
        Duration::from_millis(final_delay)
    }
}

/// Determines if a response is a rate-limit rejection.
///
/// GitHub signals primary-quota exhaustion as 403 (or 429 for secondary
/// limits) with `x-ratelimit-remaining: 0`. A plain 403 without the header
/// is an authorization problem, not a quota problem.
fn is_rate_limit_rejection(response: &Response) -> bool {
    let status = response.status();
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return false;
    }

    status == StatusCode::TOO_MANY_REQUESTS
        || response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0")
}

/// Determines if an error is retryable.
fn is_retryable_error(error: &reqwest::Error) -> bool {
    // Don't retry builder errors (configuration issues)
    if error.is_builder() {
        return false;
    }

    // Retry on timeouts, connection errors, and request errors
    error.is_timeout() || error.is_connect() || error.is_request()
}
