//! Quota command implementation.

use anyhow::{Context, Result};
use stargauge_lib::prelude::*;

/// Print the remaining GitHub API request quota.
pub(crate) async fn quota(token: Option<String>) -> Result<()> {
    let config = ClientConfig {
        token: token.or_else(|| std::env::var("GITHUB_TOKEN").ok()),
        ..Default::default()
    };
    let client = GitHubClient::new(config)?;

    let remaining = client
        .remaining_quota()
        .await
        .context("Failed to query the rate limit endpoint")?;

    println!("Remaining core API requests: {remaining}");
    Ok(())
}
