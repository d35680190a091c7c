//! Error detail structures.

use serde_json::Value;

/// Details for a non-2xx HTTP response.
///
/// Boxed inside [`Error::Api`](super::Error::Api) to keep the enum small.
///
/// ```rust
/// use chat2pay_core::error::ApiErrorDetails;
///
/// let details = ApiErrorDetails::new("Product not found", 404);
/// assert_eq!(details.status, 404);
/// assert_eq!(details.to_string(), "Product not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ApiErrorDetails {
    /// Human readable message extracted from the response.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body, attached only for JSON responses.
    pub payload: Option<Value>,
    /// Value of the `x-request-id` response header.
    pub request_id: Option<String>,
}

impl ApiErrorDetails {
    /// Creates details with a message and status only.
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            payload: None,
            request_id: None,
        }
    }

    /// Attaches the decoded response payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Attaches the server request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns `true` for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Returns `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

impl std::fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
