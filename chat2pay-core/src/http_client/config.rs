use crate::config::{ProxyConfig, trim_trailing_slashes};
use crate::error::{ConfigValidationError, ValidationResult};
use reqwest::header::HeaderMap;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Root prefixed to relative request paths. Trailing slashes are ignored.
    pub base_url: String,
    /// Request timeout, covering connect, send and body read.
    pub timeout: Duration,
    /// TCP connection timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Default User-Agent header value
    pub user_agent: String,
    /// Headers sent with every request before `Accept` and caller headers.
    pub default_headers: HeaderMap,
    /// Maximum response body size in bytes (default: 10MB)
    ///
    /// Responses exceeding this limit are rejected with an `InvalidRequest` error.
    pub max_response_size: usize,
    /// Whether to log request bodies and response previews at debug level
    pub verbose: bool,
    /// Optional proxy configuration
    pub proxy: Option<ProxyConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("chat2pay-rust/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HeaderMap::new(),
            max_response_size: 10 * 1024 * 1024,
            verbose: false,
            proxy: None,
        }
    }
}

impl HttpConfig {
    /// Creates a default configuration rooted at `base_url`.
    ///
    /// ```rust
    /// use chat2pay_core::http_client::HttpConfig;
    ///
    /// let config = HttpConfig::with_base_url("http://localhost:8080//");
    /// assert_eq!(config.base_url, "http://localhost:8080");
    /// ```
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: trim_trailing_slashes(base_url.as_ref().trim()),
            ..Self::default()
        }
    }

    /// Validates the HTTP configuration parameters.
    ///
    /// # Validation Rules
    ///
    /// - `timeout` > 5 minutes returns an error
    /// - `timeout` < 1 second generates a warning
    /// - `max_response_size` of zero returns an error
    /// - a non-empty `base_url` must be an absolute URL
    /// - an empty `base_url` generates a warning
    ///
    /// ```rust
    /// use chat2pay_core::http_client::HttpConfig;
    /// use std::time::Duration;
    ///
    /// assert!(HttpConfig::with_base_url("http://localhost:8080").validate().is_ok());
    ///
    /// let invalid = HttpConfig {
    ///     timeout: Duration::from_secs(600),
    ///     ..Default::default()
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        let mut warnings = Vec::new();

        if self.timeout > Duration::from_secs(300) {
            return Err(ConfigValidationError::too_high(
                "timeout",
                format!("{:?}", self.timeout),
                "5 minutes",
            ));
        }
        if self.timeout < Duration::from_secs(1) {
            warnings.push(format!(
                "timeout {:?} is very short, may cause frequent timeouts",
                self.timeout
            ));
        }

        if self.max_response_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_response_size",
                "max_response_size cannot be zero",
            ));
        }

        if self.base_url.is_empty() {
            warnings.push("base_url is empty, only absolute URLs can be requested".to_string());
        } else {
            url::Url::parse(&self.base_url)
                .map_err(|e| ConfigValidationError::invalid("base_url", e.to_string()))?;
        }

        Ok(ValidationResult::with_warnings(warnings))
    }
}
