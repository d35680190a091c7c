//! # Error Handling for Chat2Pay
//!
//! A single error type shared by the HTTP API client, the realtime chat
//! transport and the typed backend surface in `chat2pay-api`.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error (main error type)
//! ├── Api            - Non-2xx HTTP response (status, payload, request id)
//! ├── Network        - Transport failure, no HTTP response (via NetworkError)
//! ├── Timeout        - Operation timeout
//! ├── InvalidRequest - Invalid parameters or URLs
//! ├── Parse          - Response decoding errors (via ParseError)
//! ├── WebSocket      - Realtime transport errors
//! ├── Backend        - Backend envelope reported `status: false`
//! └── Context        - Error with additional context
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use chat2pay_core::error::{ContextExt, Error, Result};
//!
//! fn load_cart(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(Error::invalid_request("cart id cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! let err = load_cart("").context("Failed to open checkout").unwrap_err();
//! assert!(err.report().contains("cart id cannot be empty"));
//! ```
//!
//! ## Inspecting API errors
//!
//! ```rust
//! use chat2pay_core::error::Error;
//!
//! let err = Error::api("Unauthorized", 401).context("fetch orders");
//! assert_eq!(err.status(), Some(401));
//! assert_eq!(err.as_api().map(|d| d.message.as_str()), Some("Unauthorized"));
//! ```

mod config;
mod context;
mod convert;
mod details;
mod network;
mod parse;

use serde_json::Value;
use std::borrow::Cow;
use std::error::Error as StdError;
use thiserror::Error;

pub use config::{ConfigValidationError, ValidationResult};
pub use context::ContextExt;
pub use details::ApiErrorDetails;
pub use network::NetworkError;
pub use parse::ParseError;

/// Result type alias for all Chat2Pay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for the Chat2Pay client crates.
///
/// Large variants are boxed to keep the enum small, and messages use
/// `Cow<'static, str>` so static strings do not allocate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Non-2xx HTTP response. `Display` is the extracted message itself.
    #[error("{0}")]
    Api(Box<ApiErrorDetails>),

    /// Transport failure before any HTTP response was received.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// Operation timeout.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// Invalid request parameters or URLs.
    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// Errors during response decoding. Boxed to reduce enum size.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// Realtime transport errors.
    #[error("WebSocket error: {0}")]
    WebSocket(#[source] Box<dyn StdError + Send + Sync + 'static>),

    /// The backend answered 2xx but its envelope carried `status: false`.
    #[error("Backend error: {0}")]
    Backend(Cow<'static, str>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    // ==================== Constructor Methods ====================

    /// Creates an API error for a non-2xx status without payload.
    pub fn api(message: impl Into<String>, status: u16) -> Self {
        Self::Api(Box::new(ApiErrorDetails::new(message, status)))
    }

    /// Creates an API error from fully populated details.
    pub fn api_with_details(details: ApiErrorDetails) -> Self {
        Self::Api(Box::new(details))
    }

    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a backend envelope error.
    pub fn backend(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Backend(msg.into())
    }

    // ==================== Context Methods ====================

    /// Attaches context to an existing error.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    // ==================== Chain Traversal Methods ====================

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a detailed error report with the full chain.
    ///
    /// ```rust
    /// use chat2pay_core::error::Error;
    ///
    /// let err = Error::network("Connection refused").context("Failed to load products");
    /// let report = err.report();
    /// assert!(report.starts_with("Failed to load products"));
    /// assert!(report.contains("Caused by: Network error"));
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    // ==================== Helper Methods (Context Penetrating) ====================

    /// Returns the API error details, if any (penetrates Context layers).
    #[must_use]
    pub fn as_api(&self) -> Option<&ApiErrorDetails> {
        match self.root_cause() {
            Error::Api(details) => Some(details.as_ref()),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error (penetrates Context layers).
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|details| details.status)
    }

    /// Checks if this error is worth retrying (penetrates Context layers).
    ///
    /// Returns `true` for connection failures, timeouts, `429` and `5xx`
    /// API responses.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Network(ne) => matches!(
                ne.as_ref(),
                NetworkError::Timeout | NetworkError::ConnectionFailed(_)
            ),
            Error::Timeout(_) => true,
            Error::Api(details) => details.status == 429 || details.is_server_error(),
            _ => false,
        }
    }

    /// Returns the backend envelope message (penetrates Context layers).
    #[must_use]
    pub fn as_backend(&self) -> Option<&str> {
        match self.root_cause() {
            Error::Backend(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns the JSON payload attached to an API error, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.as_api().and_then(|details| details.payload.as_ref())
    }
}
