//! GitHub REST API fetcher implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::GithubConfig;
use crate::fetcher::{FetchError, RepoFetcher};
use crate::models::{PageRequest, Repository};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Fetcher for the GitHub repository-listing API
///
/// Lists a user's or organization's public repositories via
/// `GET /users/{subject}/repos`, one page per call.
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    client: Arc<Client>,
    base_url: String,
    token: Option<String>,
}

impl GithubFetcher {
    /// Create a new fetcher against api.github.com
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Create a fetcher against a custom API base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(
                Client::builder()
                    .user_agent(concat!(
                        env!("CARGO_PKG_NAME"),
                        "/",
                        env!("CARGO_PKG_VERSION")
                    ))
                    .timeout(Duration::from_secs(30))
                    .build()
                    .expect("Failed to create HTTP client"),
            ),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: std::env::var("GITHUB_TOKEN").ok(),
        }
    }

    /// Create a fetcher from configuration
    pub fn from_config(config: &GithubConfig) -> Self {
        Self {
            client: Arc::new(
                Client::builder()
                    .user_agent(concat!(
                        env!("CARGO_PKG_NAME"),
                        "/",
                        env!("CARGO_PKG_VERSION")
                    ))
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .build()
                    .expect("Failed to create HTTP client"),
            ),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Set an authentication token (raises the unauthenticated rate limit)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn build_url(&self, request: &PageRequest) -> String {
        format!(
            "{}/users/{}/repos?page={}&per_page={}",
            self.base_url,
            urlencoding::encode(&request.subject),
            request.page,
            request.per_page
        )
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoFetcher for GithubFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Repository>, FetchError> {
        let url = self.build_url(request);

        tracing::debug!(
            subject = %request.subject,
            page = request.page,
            "fetching repository page"
        );

        let mut builder = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            FetchError::Network(format!("Failed to reach GitHub API: {}", e))
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!(
                "no such user or organization: {}",
                request.subject
            )));
        }

        // GitHub signals rate limiting with 403 as well as 429
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            return Err(FetchError::RateLimit);
        }

        if !status.is_success() {
            return Err(FetchError::Api(format!(
                "GitHub API returned status: {}",
                status
            )));
        }

        let repos: Vec<Repository> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("Failed to parse repository list: {}", e)))?;

        tracing::debug!(
            subject = %request.subject,
            page = request.page,
            count = repos.len(),
            "repository page fetched"
        );

        Ok(repos)
    }
}
