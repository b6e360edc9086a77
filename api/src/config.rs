//! Client configuration.

use std::time::Duration;

/// Environment variable overriding the backend base address.
pub const ENV_BASE_URL: &str = "TASKHIVE_API_URL";

/// Default backend base address (local development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Fixed request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base address, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration for the given base address.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the base address from `TASKHIVE_API_URL`, falling back to the
    /// local development default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
