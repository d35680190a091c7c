//! Parsing-related error types.

use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while decoding backend payloads.
///
/// ```rust
/// use chat2pay_core::error::{Error, ParseError};
///
/// let err = Error::from(ParseError::missing_field("access_token"));
/// assert!(err.to_string().contains("access_token"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// Failed to deserialize JSON.
    #[error("Failed to deserialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required field in response.
    #[error("Missing required field: {0}")]
    MissingField(Cow<'static, str>),
}

impl ParseError {
    /// Creates a `MissingField` error with a static string (no allocation).
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(Cow::Borrowed(field))
    }
}
