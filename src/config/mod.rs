//! Configuration management.
//!
//! Settings come from a TOML file with environment variable overrides
//! (prefix `REPO_LENS`):
//!
//! ```toml
//! [github]
//! token = "ghp_..."
//! api_base = "https://api.github.com"
//! page_size = 30
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API settings
    #[serde(default)]
    pub github: GithubConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token (optional, for higher rate limits)
    #[serde(default = "default_token")]
    pub token: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Repositories requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            api_base: default_api_base(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_page_size() -> u32 {
    crate::models::DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

/// Load configuration from a file, layering environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("REPO_LENS"))
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the conventional locations.
///
/// Probes `./repo-lens.toml` first, then the platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("repo-lens.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("repo-lens").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
