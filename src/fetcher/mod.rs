//! Remote fetcher boundary for the repository-listing API.
//!
//! This module defines the [`RepoFetcher`] trait: given a subject and a
//! page number, return one ordered page of [`Repository`] records or
//! fail. An empty page signals end-of-data for the subject.
//!
//! [`GithubFetcher`] is the production implementation against the
//! GitHub REST API; [`MockFetcher`] is a scripted stand-in for tests.

mod github;
pub mod mock;

pub use github::GithubFetcher;
pub use mock::MockFetcher;

use crate::models::{PageRequest, Repository};
use async_trait::async_trait;

/// Interface for fetching pages of a subject's repositories.
///
/// Implementations perform a single attempt per call; retry policy is
/// the caller's concern (and the browser deliberately has none).
#[async_trait]
pub trait RepoFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch one page of repositories for the requested subject.
    ///
    /// The returned sequence preserves the API's ordering. An empty
    /// vector means the subject has no further pages.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Repository>, FetchError>;
}

/// Errors that can occur when fetching a page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Subject not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream API error
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(format!("JSON: {}", err))
    }
}
