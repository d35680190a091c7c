use crate::error::{ApiErrorDetails, Error, Result};
use reqwest::{
    Response, StatusCode,
    header::{CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::builder::HttpClient;

const BODY_PREVIEW_SIZE: usize = 200;
const REQUEST_ID_HEADER: &str = "x-request-id";

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Parsed body: JSON for `*json*` content types, text otherwise, `None`
    /// for 204/205 or an unparseable JSON body.
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Decodes the body into `T`. A missing body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.data.as_ref().unwrap_or(&Value::Null);
        Ok(T::deserialize(value)?)
    }

    /// Consumes the response, returning the body.
    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    /// Returns a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
}

fn non_empty_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Picks the error message: payload `error`, then `message`, then a
/// status-based fallback.
pub(crate) fn error_message(status: u16, payload: Option<&Value>) -> String {
    payload
        .and_then(|p| non_empty_str(p, "error").or_else(|| non_empty_str(p, "message")))
        .map_or_else(
            || format!("Request failed with status {status}"),
            str::to_string,
        )
}

/// Outcome of reading a body under the size limit.
enum Body {
    Complete(Vec<u8>),
    /// Reading stopped once this many bytes had arrived.
    Oversized(usize),
}

fn oversized(size: u64, max_size: usize) -> Error {
    Error::invalid_request(format!(
        "Response size {size} bytes exceeds limit {max_size} bytes"
    ))
}

fn preview(bytes: &[u8]) -> String {
    let end = bytes.len().min(BODY_PREVIEW_SIZE);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

impl HttpClient {
    #[instrument(name = "http_process_response", skip(self, response), fields(status, url = %url))]
    pub(crate) async fn process_response(
        &self,
        response: Response,
        url: &str,
    ) -> Result<ApiResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let max_size = self.config().max_response_size;

        tracing::Span::current().record("status", status.as_u16());

        if status.is_success()
            && let Some(content_length) = response.content_length()
            && content_length > max_size as u64
        {
            warn!(
                url = %url,
                content_length = content_length,
                max_size = max_size,
                "Response exceeds size limit (Content-Length check)"
            );
            return Err(oversized(content_length, max_size));
        }

        // Error bodies past the limit are dropped; the status still reports.
        let body = self
            .stream_response_with_limit(response, url, max_size)
            .await?;
        let (body_bytes, truncated) = match body {
            Body::Complete(bytes) => (bytes, false),
            Body::Oversized(size) if status.is_success() => {
                return Err(oversized(size as u64, max_size));
            }
            Body::Oversized(_) => (Vec::new(), true),
        };

        let is_json = is_json_content(&headers);
        let has_body = !matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT);

        let data = if !has_body || truncated {
            None
        } else if is_json {
            match serde_json::from_slice::<Value>(&body_bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!(
                        error = %e,
                        body_preview = %preview(&body_bytes),
                        "Discarding unparseable JSON body"
                    );
                    None
                }
            }
        } else {
            Some(Value::String(
                String::from_utf8_lossy(&body_bytes).into_owned(),
            ))
        };

        if self.config().verbose {
            debug!(
                status = %status,
                body_length = body_bytes.len(),
                body_preview = %preview(&body_bytes),
                "HTTP response received"
            );
        }

        if !status.is_success() {
            let payload = if is_json { data } else { None };
            let request_id = headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let details = ApiErrorDetails::new(
                error_message(status.as_u16(), payload.as_ref()),
                status.as_u16(),
            )
            .with_payload(payload)
            .with_request_id(request_id);

            if status.is_server_error() {
                error!(status = status.as_u16(), message = %details.message, "HTTP error response");
            } else {
                warn!(status = status.as_u16(), message = %details.message, "HTTP error response");
            }
            return Err(Error::api_with_details(details));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            data,
        })
    }

    async fn stream_response_with_limit(
        &self,
        response: Response,
        url: &str,
        max_size: usize,
    ) -> Result<Body> {
        use futures_util::StreamExt;

        #[allow(clippy::cast_possible_truncation)]
        let initial_capacity = response
            .content_length()
            .map_or(8 * 1024, |len| std::cmp::min(len as usize, max_size));

        let mut stream = response.bytes_stream();
        let mut body = Vec::with_capacity(initial_capacity);
        let mut accumulated_size: usize = 0;

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) if e.is_timeout() => {
                    warn!(url = %url, "Timed out reading response body");
                    return Err(Error::timeout(format!(
                        "Reading response from {url} timed out"
                    )));
                }
                Err(e) => {
                    error!(error = %e, "Failed to read response chunk");
                    return Err(e.into());
                }
            };

            accumulated_size = accumulated_size.saturating_add(chunk.len());

            if accumulated_size > max_size {
                warn!(
                    url = %url,
                    accumulated_size = accumulated_size,
                    max_size = max_size,
                    "Response exceeds size limit during streaming"
                );
                return Ok(Body::Oversized(accumulated_size));
            }

            body.extend_from_slice(&chunk);
        }

        Ok(Body::Complete(body))
    }
}
