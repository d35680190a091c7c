//! The `{status, data, error}` envelope wrapping every backend reply.

use chat2pay_core::{ApiResponse, Error, ParseError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Backend envelope.
///
/// Failures carry `status: false` and a message in `error`; `data` is then
/// meaningless (the backend sends `""`), so payloads are decoded only after
/// the status check. Start from [`BackendResponse::from_response`] and call
/// [`decode`](BackendResponse::decode).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendResponse<T = Value> {
    /// Whether the backend handled the request
    #[serde(default)]
    pub status: bool,
    /// Payload
    #[serde(default)]
    pub data: Option<T>,
    /// Failure message
    #[serde(default)]
    pub error: Option<String>,
}

impl BackendResponse<Value> {
    /// Reads the envelope from an HTTP response body.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the body is not an envelope object.
    pub fn from_response(response: &ApiResponse) -> Result<Self> {
        response.json()
    }

    /// Decodes the payload of a successful envelope into `T`. Failed
    /// envelopes pass through with no data.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<BackendResponse<T>> {
        let data = match self.data {
            Some(value) if self.status && !value.is_null() => Some(serde_json::from_value(value)?),
            _ => None,
        };
        Ok(BackendResponse {
            status: self.status,
            data,
            error: self.error,
        })
    }
}

impl<T> BackendResponse<T> {
    /// Returns the payload, which may be absent, or fails with
    /// [`Error::Backend`] carrying the backend's message or `fallback`.
    ///
    /// ```rust
    /// use chat2pay_api::BackendResponse;
    ///
    /// let failed: BackendResponse<u32> = BackendResponse {
    ///     status: false,
    ///     data: None,
    ///     error: None,
    /// };
    /// let err = failed.into_result("Failed to get provinces").unwrap_err();
    /// assert_eq!(err.as_backend(), Some("Failed to get provinces"));
    /// ```
    pub fn into_result(self, fallback: &'static str) -> Result<Option<T>> {
        if self.status {
            return Ok(self.data);
        }
        Err(match self.error {
            Some(message) if !message.trim().is_empty() => Error::backend(message),
            _ => Error::backend(fallback),
        })
    }

    /// Like [`into_result`](Self::into_result) but a missing payload is a
    /// parse error.
    pub fn into_data(self, fallback: &'static str) -> Result<T> {
        self.into_result(fallback)?
            .ok_or_else(|| ParseError::missing_field("data").into())
    }
}

impl<T: Default> BackendResponse<T> {
    /// Like [`into_result`](Self::into_result) but a missing payload decodes
    /// as `T::default()`, typically an empty list.
    pub fn into_data_or_default(self, fallback: &'static str) -> Result<T> {
        Ok(self.into_result(fallback)?.unwrap_or_default())
    }
}
