//! Wire-contract tests for the GitHub fetcher against a local mock server.

use mockito::Matcher;
use repo_lens::browser::{BrowserState, RepoBrowser};
use repo_lens::fetcher::{FetchError, GithubFetcher, RepoFetcher};
use repo_lens::models::PageRequest;
use std::sync::Arc;

const PAGE_BODY: &str = r#"[
    {
        "id": 1296269,
        "name": "Hello-World",
        "description": "My first repository on GitHub!",
        "language": "Ruby",
        "stargazers_count": 2540,
        "forks_count": 1300,
        "html_url": "https://github.com/octocat/Hello-World",
        "owner": { "id": 583231, "login": "octocat" }
    },
    {
        "id": 1300192,
        "name": "Spoon-Knife",
        "description": null,
        "language": null,
        "stargazers_count": 12000,
        "forks_count": 140000,
        "html_url": "https://github.com/octocat/Spoon-Knife",
        "owner": { "id": 583231, "login": "octocat" }
    }
]"#;

#[tokio::test]
async fn test_fetch_page_parses_repositories() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PAGE_BODY)
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let repos = fetcher
        .fetch_page(&PageRequest::new("octocat", 1))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "Hello-World");
    assert_eq!(repos[0].language, Some("Ruby".to_string()));
    assert_eq!(repos[1].description, None);
    assert_eq!(repos[1].owner.login, "octocat");
}

#[tokio::test]
async fn test_fetch_page_sends_pagination_params() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "3".into()),
            Matcher::UrlEncoded("per_page".into(), "50".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let repos = fetcher
        .fetch_page(&PageRequest::new("octocat", 3).per_page(50))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_fetch_page_sends_api_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .match_header("accept", "application/vnd.github+json")
        .match_header("x-github-api-version", "2022-11-28")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    fetcher
        .fetch_page(&PageRequest::new("octocat", 1))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_page_unknown_user_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/ghost/repos")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let err = fetcher
        .fetch_page(&PageRequest::new("ghost", 1))
        .await
        .unwrap_err();

    match err {
        FetchError::NotFound(message) => assert!(message.contains("ghost")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_page_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let err = fetcher
        .fetch_page(&PageRequest::new("octocat", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::RateLimit));
}

#[tokio::test]
async fn test_fetch_page_server_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let err = fetcher
        .fetch_page(&PageRequest::new("octocat", 1))
        .await
        .unwrap_err();

    match err {
        FetchError::Api(message) => assert!(message.contains("500")),
        other => panic!("expected Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_page_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "not a list"}"#)
        .create_async()
        .await;

    let fetcher = GithubFetcher::with_base_url(server.url());
    let err = fetcher
        .fetch_page(&PageRequest::new("octocat", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

/// End-to-end: browser paging over the HTTP fetcher.
#[tokio::test]
async fn test_browser_pages_over_http() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PAGE_BODY)
        .create_async()
        .await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let fetcher = Arc::new(GithubFetcher::with_base_url(server.url()));
    let browser = RepoBrowser::new(fetcher);

    browser.search("octocat").await;
    browser.load_more().await;

    match browser.current_state() {
        BrowserState::Success {
            repos,
            is_fetching_more,
        } => {
            assert_eq!(repos.len(), 2);
            assert!(!is_fetching_more);
        }
        other => panic!("expected Success, got {:?}", other),
    }
    assert!(browser.is_exhausted());
    assert!(browser.lookup("Spoon-Knife").is_some());
}
