//! Analyze command implementation.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use stargauge_lib::prelude::*;

use crate::display::{Format, print_analytics};

/// Analyze a repository's star history.
pub(crate) async fn analyze(
    repo: &str,
    full_scan: bool,
    format: Format,
    token: Option<String>,
    quiet: bool,
) -> Result<()> {
    let key: RepoKey = repo
        .parse()
        .with_context(|| format!("Invalid repository: {repo}"))?;

    let config = ClientConfig {
        token: token.or_else(|| std::env::var("GITHUB_TOKEN").ok()),
        ..Default::default()
    };
    let client = GitHubClient::new(config)?;
    let engine = StarEngine::new(client);

    // JSON output goes to stdout; keep the spinner off it
    let progress = if quiet || matches!(format, Format::Json) {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(format!("Fetching star history for {key}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let result = engine.analyze(&key, full_scan).await;
    progress.finish_and_clear();

    let analytics = result.with_context(|| format!("Failed to analyze {key}"))?;
    print_analytics(&analytics, format)
}
