//! # repo-lens
//!
//! Search a GitHub user's or organization's public repositories,
//! accumulate them page by page, and resolve a selected repository for
//! detail display.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Repository, PageRequest)
//! - [`fetcher`]: Remote fetcher boundary (GitHub REST implementation and a test mock)
//! - [`browser`]: The paginated fetch/state-reconciliation engine
//! - [`ui`]: Terminal rendering helpers
//! - [`config`]: Configuration management

pub mod browser;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use browser::{BrowserState, RepoBrowser};
pub use fetcher::{FetchError, GithubFetcher, RepoFetcher};
pub use models::Repository;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
