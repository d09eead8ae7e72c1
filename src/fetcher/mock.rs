//! Mock fetcher for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::fetcher::{FetchError, RepoFetcher};
use crate::models::{PageRequest, RepoOwner, Repository, RepositoryBuilder};

/// A mock fetcher that replays scripted page results in FIFO order.
///
/// Each scripted response may carry a delay, which holds the fetch
/// in-flight long enough for tests to exercise concurrency guards.
/// Every request received is recorded for later inspection.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<PageRequest>>,
}

#[derive(Debug)]
struct ScriptedResponse {
    result: Result<Vec<Repository>, FetchError>,
    delay: Option<Duration>,
}

impl MockFetcher {
    /// Create a new mock fetcher with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful page result.
    pub fn push_page(&self, repos: Vec<Repository>) {
        self.responses.lock().unwrap().push_back(ScriptedResponse {
            result: Ok(repos),
            delay: None,
        });
    }

    /// Queue a successful page result that resolves after `delay`.
    pub fn push_page_delayed(&self, repos: Vec<Repository>, delay: Duration) {
        self.responses.lock().unwrap().push_back(ScriptedResponse {
            result: Ok(repos),
            delay: Some(delay),
        });
    }

    /// Queue a failed fetch.
    pub fn push_error(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(ScriptedResponse {
            result: Err(error),
            delay: None,
        });
    }

    /// Queue a failed fetch that resolves after `delay`.
    pub fn push_error_delayed(&self, error: FetchError, delay: Duration) {
        self.responses.lock().unwrap().push_back(ScriptedResponse {
            result: Err(error),
            delay: Some(delay),
        });
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Copy of every request received, in arrival order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoFetcher for MockFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Repository>, FetchError> {
        self.requests.lock().unwrap().push(request.clone());

        let scripted = self.responses.lock().unwrap().pop_front();
        match scripted {
            Some(response) => {
                if let Some(delay) = response.delay {
                    tokio::time::sleep(delay).await;
                }
                response.result
            }
            // Unscripted pages read as end-of-data
            None => Ok(Vec::new()),
        }
    }
}

/// Helper function to create a repository fixture for testing.
pub fn make_repo(id: u64, name: &str) -> Repository {
    RepositoryBuilder::new(
        id,
        name,
        RepoOwner {
            id: 1,
            login: "octocat".to_string(),
        },
    )
    .description(format!("Test repository {}", name))
    .language("Rust")
    .stargazers(id as u32)
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let fetcher = MockFetcher::new();
        fetcher.push_page(vec![make_repo(1, "first")]);
        fetcher.push_page(vec![make_repo(2, "second")]);

        let page1 = fetcher.fetch_page(&PageRequest::new("octocat", 1)).await.unwrap();
        let page2 = fetcher.fetch_page(&PageRequest::new("octocat", 2)).await.unwrap();

        assert_eq!(page1[0].name, "first");
        assert_eq!(page2[0].name, "second");
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_defaults_to_empty_page() {
        let fetcher = MockFetcher::new();
        let page = fetcher.fetch_page(&PageRequest::new("octocat", 1)).await.unwrap();
        assert!(page.is_empty());
    }
}
