//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Transport failures that happened before an HTTP response was received.
///
/// Wraps `reqwest` failures without exposing the library type in the
/// public API. HTTP error statuses are never represented here; they become
/// [`Error::Api`](super::Error::Api).
///
/// # Retryable Errors
///
/// - [`NetworkError::Timeout`]
/// - [`NetworkError::ConnectionFailed`]
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Opaque transport error for underlying issues.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
