//! Client configuration, read once at startup.

use std::time::Duration;

use serde::Deserialize;

/// The single global request timeout. Requests never override it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://api.example.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix in front of every route, e.g. `/api`. May be empty.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(&default_base_url(), &default_api_prefix())
    }
}

impl ClientConfig {
    pub fn new(base_url: &str, api_prefix: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_prefix(api_prefix),
        }
    }

    /// Reads `API_BASE_URL` and `API_PREFIX`, falling back to the defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL").unwrap_or_else(|_| default_base_url());
        let api_prefix = std::env::var("API_PREFIX").unwrap_or_else(|_| default_api_prefix());
        Self::new(&base_url, &api_prefix)
    }

    pub fn timeout(&self) -> Duration {
        REQUEST_TIMEOUT
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
