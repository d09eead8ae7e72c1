//! Page request model for the repository-listing API.

use serde::{Deserialize, Serialize};

/// Default number of repositories per page (the GitHub API default).
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// A request for one page of a subject's repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Username or organization being listed
    pub subject: String,

    /// Page number, starting at 1
    pub page: u32,

    /// Results per page
    pub per_page: u32,
}

impl PageRequest {
    /// Create a request for a page of the subject's repositories
    pub fn new(subject: impl Into<String>, page: u32) -> Self {
        Self {
            subject: subject.into(),
            page,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set results per page
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}
