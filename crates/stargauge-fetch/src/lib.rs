//! GitHub API client for the stargauge analytics engine.
//!
//! This crate provides the page-fetching layer:
//!
//! - [`GitHubClient`] - HTTP client with connection pooling and retries
//! - [`GitHubClient::summary`] - Repository metadata (star total, creation date)
//! - [`GitHubClient::star_page`] - One classified page of star events
//! - [`GitHubClient::remaining_quota`] - Remaining request quota

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stargauge/stargauge/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod wire;

pub use client::{ClientConfig, FetchError, GitHubClient};
