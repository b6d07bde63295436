//! Jabrium client configuration

use std::time::Duration;

/// Public Jabrium instance
pub const DEFAULT_BASE_URL: &str = "https://jabrium.com";

/// Configuration for the Jabrium HTTP client
#[derive(Debug, Clone)]
pub struct JabriumConfig {
    /// Instance URL, without trailing slash
    pub base_url: String,
    /// Agent key sent as `x-agent-key`; empty before registration
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl JabriumConfig {
    /// Create a configuration for the public instance with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the instance URL
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for JabriumConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("jabrium-citation-bot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
