//! Runtime configuration shared by the HTTP and realtime clients.

use crate::error::{ConfigValidationError, ValidationResult};
use tracing::{debug, warn};

/// Environment variable holding the HTTP API base URL.
pub const API_BASE_URL_ENV: &str = "CHAT2PAY_API_BASE_URL";

/// Environment variable holding the realtime chat base URL.
pub const WS_URL_ENV: &str = "CHAT2PAY_WS_URL";

/// Realtime base URL used when [`WS_URL_ENV`] is unset.
pub const DEFAULT_WS_BASE_URL: &str = "ws://localhost:9005";

/// Base URLs resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// HTTP API base URL, trailing slashes removed. Empty when unset.
    pub api_base_url: String,
    /// Realtime chat base URL, trailing slashes removed.
    pub ws_base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            ws_base_url: DEFAULT_WS_BASE_URL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Loads the configuration from the process environment, reading a
    /// `.env` file first when one is present.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Failed to read .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_BASE_URL_ENV)
            .map(|v| trim_trailing_slashes(v.trim()))
            .unwrap_or_default();
        if api_base_url.is_empty() {
            warn!(
                variable = API_BASE_URL_ENV,
                "API base URL is not set, requests must use absolute URLs"
            );
        }

        let ws_base_url = lookup(WS_URL_ENV)
            .map(|v| trim_trailing_slashes(v.trim()))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_WS_BASE_URL.to_string());

        Self {
            api_base_url,
            ws_base_url,
        }
    }

    /// Checks that both base URLs are absolute.
    pub fn validate(&self) -> Result<ValidationResult, ConfigValidationError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigValidationError::missing("api_base_url"));
        }
        url::Url::parse(&self.api_base_url)
            .map_err(|e| ConfigValidationError::invalid("api_base_url", e.to_string()))?;
        url::Url::parse(&self.ws_base_url)
            .map_err(|e| ConfigValidationError::invalid("ws_base_url", e.to_string()))?;

        let mut result = ValidationResult::new();
        if !self.ws_base_url.starts_with("ws://") && !self.ws_base_url.starts_with("wss://") {
            result.add_warning(format!(
                "ws_base_url {} does not use a ws:// or wss:// scheme",
                self.ws_base_url
            ));
        }
        Ok(result)
    }
}

/// Removes every trailing `/` from a URL.
pub(crate) fn trim_trailing_slashes(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy URL (e.g., "http://127.0.0.1:8080").
    pub url: String,
    /// Optional username for authentication.
    pub username: Option<String>,
    /// Optional password for authentication.
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Create a new proxy configuration with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set credentials for the proxy.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}
