//! Core data models for repository records and page requests.

mod page;
mod repo;

pub use page::{PageRequest, DEFAULT_PAGE_SIZE};
pub use repo::{RepoOwner, Repository, RepositoryBuilder};
