//! Chat socket configuration types.

use crate::config::trim_trailing_slashes;
use crate::error::{ConfigValidationError, Error, Result, ValidationResult};
use crate::retry_strategy::RetryConfig;
use std::time::Duration;

use super::callbacks::ChatCallbacks;

/// Default time allowed for the close handshake, in milliseconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 5000;

/// Transport tuning shared by every connection of a [`ChatSocket`](super::ChatSocket).
#[derive(Debug, Clone)]
pub struct ChatSocketConfig {
    /// Opening handshake timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Keepalive ping interval; `None` disables pings
    pub ping_interval: Option<Duration>,
    /// Reconnect schedule (default: [`RetryConfig::chat_reconnect`])
    pub reconnect: RetryConfig,
    /// Time allowed for the close frame and supervisor exit
    pub shutdown_timeout: Duration,
}

impl Default for ChatSocketConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            ping_interval: None,
            reconnect: RetryConfig::chat_reconnect(),
            shutdown_timeout: Duration::from_millis(DEFAULT_SHUTDOWN_TIMEOUT),
        }
    }
}

impl ChatSocketConfig {
    /// Validates the configuration, including the reconnect schedule.
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigValidationError::invalid(
                "connect_timeout",
                "connect_timeout cannot be zero",
            ));
        }
        if let Some(interval) = self.ping_interval
            && interval < Duration::from_secs(1)
        {
            return Err(ConfigValidationError::too_low(
                "ping_interval",
                format!("{interval:?}"),
                "1s",
            ));
        }

        let mut result = self.reconnect.validate()?;
        if self.shutdown_timeout.is_zero() {
            result.add_warning("shutdown_timeout is zero, close frames may never be sent");
        }
        Ok(result)
    }
}

/// Target and handlers for one [`ChatSocket::connect`](super::ChatSocket::connect) call.
#[derive(Debug, Clone)]
pub struct ChatConnectConfig {
    /// Realtime base URL (`ws://` or `wss://`)
    pub base_url: String,
    /// User whose chat stream is opened
    pub user_id: String,
    /// Lifecycle and message handlers
    pub callbacks: ChatCallbacks,
}

impl ChatConnectConfig {
    /// Creates a connect configuration.
    pub fn new(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        callbacks: ChatCallbacks,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
            callbacks,
        }
    }

    /// Builds `<base>/ws/chat/<user-id>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when the user id is blank, the URL does
    /// not parse, or its scheme is not `ws`/`wss`.
    ///
    /// ```rust
    /// use chat2pay_core::chat_socket::{ChatCallbacks, ChatConnectConfig};
    ///
    /// let config = ChatConnectConfig::new("ws://localhost:9005/", "42", ChatCallbacks::new(|_| {}));
    /// assert_eq!(config.target_url().unwrap(), "ws://localhost:9005/ws/chat/42");
    /// ```
    pub fn target_url(&self) -> Result<String> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            return Err(Error::invalid_request("Chat user id is empty"));
        }

        let url = format!(
            "{}/ws/chat/{user_id}",
            trim_trailing_slashes(self.base_url.trim())
        );
        let parsed = url::Url::parse(&url)?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(Error::invalid_request(format!(
                "Chat URL must use ws:// or wss://, got {}://",
                parsed.scheme()
            )));
        }
        Ok(url)
    }
}
