//! Chat2Pay client builder.
//!
//! Provides a fluent API for constructing [`Chat2Pay`] clients.

use crate::client::Chat2Pay;
use chat2pay_core::{
    ChatSocketConfig, HttpClient, HttpConfig, ProxyConfig, Result, RetryConfig, RuntimeConfig,
    SessionToken,
};
use reqwest::header::{HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Builder for [`Chat2Pay`] clients.
///
/// # Example
///
/// ```no_run
/// use chat2pay_api::Chat2PayBuilder;
/// use std::time::Duration;
///
/// let client = Chat2PayBuilder::new()
///     .base_url("https://api.chat2pay.test")
///     .ws_url("wss://api.chat2pay.test")
///     .timeout(Duration::from_secs(15))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Chat2PayBuilder {
    http: HttpConfig,
    ws_base_url: String,
    socket: ChatSocketConfig,
    token: Option<String>,
}

impl Default for Chat2PayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Chat2PayBuilder {
    /// Creates a builder with no API base URL and the local realtime endpoint.
    pub fn new() -> Self {
        Self::from_runtime(&RuntimeConfig::default())
    }

    /// Creates a builder seeded from `CHAT2PAY_API_BASE_URL` and
    /// `CHAT2PAY_WS_URL`.
    pub fn from_env() -> Self {
        Self::from_runtime(&RuntimeConfig::from_env())
    }

    /// Creates a builder seeded from resolved base URLs.
    pub fn from_runtime(config: &RuntimeConfig) -> Self {
        Self {
            http: HttpConfig::with_base_url(&config.api_base_url),
            ws_base_url: config.ws_base_url.clone(),
            socket: ChatSocketConfig::default(),
            token: None,
        }
    }

    /// Sets the HTTP API base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.http.base_url = HttpConfig::with_base_url(url).base_url;
        self
    }

    /// Sets the realtime chat base URL (`ws://` or `wss://`).
    pub fn ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_base_url = url.into();
        self
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Sets the TCP connect timeout for HTTP calls.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http.connect_timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = user_agent.into();
        self
    }

    /// Adds a header sent with every request. Caller headers on a single
    /// request still win.
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.http.default_headers.insert(name, value);
        self
    }

    /// Routes HTTP traffic through a proxy.
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.http.proxy = Some(proxy);
        self
    }

    /// Logs request and response details at debug level.
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.http.verbose = enabled;
        self
    }

    /// Starts with a signed-in session token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces the realtime transport settings.
    pub fn socket_config(mut self, config: ChatSocketConfig) -> Self {
        self.socket = config;
        self
    }

    /// Replaces the realtime reconnect schedule.
    pub fn reconnect(mut self, reconnect: RetryConfig) -> Self {
        self.socket.reconnect = reconnect;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](chat2pay_core::Error::InvalidRequest)
    /// when the HTTP or realtime settings are invalid, or a network error
    /// when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Chat2Pay> {
        for warning in self.http.validate()?.warnings {
            warn!(warning = %warning, "HTTP configuration warning");
        }
        for warning in self.socket.validate()?.warnings {
            warn!(warning = %warning, "Chat socket configuration warning");
        }

        let session = SessionToken::new();
        if let Some(token) = self.token {
            session.set(token);
        }
        let http = HttpClient::new(self.http)?.with_token_provider(Arc::new(session.clone()));

        Ok(Chat2Pay::from_parts(
            http,
            session,
            self.ws_base_url,
            self.socket,
        ))
    }
}
