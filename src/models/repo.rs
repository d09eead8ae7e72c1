//! Repository model representing one GitHub repository record.

use serde::{Deserialize, Serialize};

/// The owner (user or organization) a repository belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    /// Platform-unique owner id
    pub id: u64,

    /// Owner login name
    pub login: String,
}

/// A GitHub repository as returned by the repository-listing API.
///
/// This struct is the standardized record shape across the crate:
/// deserialized from one item of a page response, accumulated by the
/// browser session, and rendered by the presentation layer. Immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Platform-unique repository id
    pub id: u64,

    /// Repository name
    pub name: String,

    /// Description text, if the repository has one
    pub description: Option<String>,

    /// Primary language, if GitHub detected one
    pub language: Option<String>,

    /// Star count
    pub stargazers_count: u32,

    /// Fork count
    pub forks_count: u32,

    /// Repository page URL
    pub html_url: Option<String>,

    /// Owner reference
    pub owner: RepoOwner,
}

impl Repository {
    /// Create a new repository with required fields
    pub fn new(id: u64, name: String, owner: RepoOwner) -> Self {
        Self {
            id,
            name,
            description: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            html_url: None,
            owner,
        }
    }

    /// Returns the owner's login name
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }

    /// Returns the full "owner/name" slug
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Builder for constructing Repository objects
///
/// Mostly useful for fixtures; production records come from
/// deserializing API responses.
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    repo: Repository,
}

impl RepositoryBuilder {
    /// Create a new builder with required fields
    pub fn new(id: u64, name: impl Into<String>, owner: RepoOwner) -> Self {
        Self {
            repo: Repository::new(id, name.into(), owner),
        }
    }

    /// Set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.repo.description = Some(description.into());
        self
    }

    /// Set primary language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.repo.language = Some(language.into());
        self
    }

    /// Set star count
    pub fn stargazers(mut self, count: u32) -> Self {
        self.repo.stargazers_count = count;
        self
    }

    /// Set fork count
    pub fn forks(mut self, count: u32) -> Self {
        self.repo.forks_count = count;
        self
    }

    /// Set repository page URL
    pub fn html_url(mut self, url: impl Into<String>) -> Self {
        self.repo.html_url = Some(url.into());
        self
    }

    /// Build the Repository
    pub fn build(self) -> Repository {
        self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> RepoOwner {
        RepoOwner {
            id: 583231,
            login: "octocat".to_string(),
        }
    }

    #[test]
    fn test_repository_builder() {
        let repo = RepositoryBuilder::new(1296269, "Hello-World", owner())
            .description("My first repository on GitHub!")
            .language("Ruby")
            .stargazers(2540)
            .forks(1300)
            .build();

        assert_eq!(repo.id, 1296269);
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.language, Some("Ruby".to_string()));
        assert_eq!(repo.stargazers_count, 2540);
        assert_eq!(repo.full_name(), "octocat/Hello-World");
    }

    #[test]
    fn test_deserialize_optional_fields() {
        // description and language are null for plenty of real repos;
        // the record must tolerate both.
        let json = r#"{
            "id": 42,
            "name": "scratch",
            "description": null,
            "language": null,
            "stargazers_count": 0,
            "forks_count": 0,
            "owner": { "id": 7, "login": "octocat" }
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "scratch");
        assert_eq!(repo.description, None);
        assert_eq!(repo.language, None);
        assert_eq!(repo.html_url, None);
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        // The real payload carries dozens of fields we don't model.
        let json = r#"{
            "id": 42,
            "name": "scratch",
            "stargazers_count": 3,
            "forks_count": 1,
            "watchers_count": 3,
            "default_branch": "main",
            "owner": { "id": 7, "login": "octocat", "type": "User" }
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers_count, 3);
        assert_eq!(repo.owner_login(), "octocat");
    }
}
