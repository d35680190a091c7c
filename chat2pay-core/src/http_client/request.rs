use crate::config::trim_trailing_slashes;
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{
    Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::builder::HttpClient;
use super::query::{Query, QueryValue};
use super::response::ApiResponse;

lazy_static! {
    /// Matches `http://` or `https://` at the start, in any case.
    static ref ABSOLUTE_URL: Regex =
        Regex::new(r"(?i)^https?://").expect("Invalid absolute URL regex pattern");
}

/// Returns `true` when `value` starts with `http://` or `https://`, in any case.
pub fn is_absolute_url(value: &str) -> bool {
    ABSOLUTE_URL.is_match(value)
}

/// Full request descriptor accepted by [`HttpClient::request`].
///
/// When both `json` and `body` are set, `json` wins.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method (default `GET`).
    pub method: Method,
    /// Query parameters appended to the URL.
    pub query: Query,
    /// JSON payload, serialized with `Content-Type: application/json`.
    pub json: Option<Value>,
    /// Raw body sent as-is when `json` is absent.
    pub body: Option<Vec<u8>>,
    /// Caller headers, overriding defaults.
    pub headers: HeaderMap,
    /// Per-call timeout overriding [`HttpConfig::timeout`](super::HttpConfig::timeout).
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates options for `method`.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Sets the query.
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Serializes `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `payload` cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        self.json = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// Sets an already built JSON body.
    #[must_use]
    pub fn with_json_value(mut self, payload: Value) -> Self {
        self.json = Some(payload);
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets one header, replacing previous values for `name`.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options for requests that never carry a body (`GET`, `DELETE`).
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Query parameters appended to the URL.
    pub query: Query,
    /// Caller headers, overriding defaults.
    pub headers: HeaderMap,
    /// Per-call timeout.
    pub timeout: Option<Duration>,
}

impl ReadOptions {
    /// Creates options carrying only `query`.
    pub fn with_query(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Sets one header, replacing previous values for `name`.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_request(self, method: Method) -> RequestOptions {
        RequestOptions {
            method,
            query: self.query,
            json: None,
            body: None,
            headers: self.headers,
            timeout: self.timeout,
        }
    }
}

impl HttpClient {
    /// Resolves `path` against the base URL.
    ///
    /// Absolute `http(s)://` paths are used as-is. Relative paths are trimmed,
    /// prefixed with `/` (empty becomes `/`) and appended to the base URL.
    pub fn resolve_url(&self, path: &str) -> String {
        let trimmed = path.trim();
        if is_absolute_url(trimmed) {
            return trimmed.to_string();
        }
        let base = trim_trailing_slashes(&self.config().base_url);
        if trimmed.is_empty() {
            format!("{base}/")
        } else if trimmed.starts_with('/') {
            format!("{base}{trimmed}")
        } else {
            format!("{base}/{trimmed}")
        }
    }

    /// Executes a single HTTP request.
    ///
    /// Header precedence, lowest first: configured defaults, `Accept:
    /// application/json` (only when absent), caller headers, then the bearer
    /// token from the token provider.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any non-2xx status
    /// - [`Error::Timeout`] when the request exceeds its timeout
    /// - [`Error::Network`] when the request cannot be sent
    /// - [`Error::InvalidRequest`] when the response exceeds `max_response_size`
    #[instrument(
        name = "http_request",
        skip(self, options),
        fields(method = %options.method, path = %path, status)
    )]
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        let RequestOptions {
            method,
            query,
            json,
            body,
            headers: caller_headers,
            timeout,
        } = options;

        let mut url = self.resolve_url(path);
        query.append_to(&mut url);

        let mut headers = self.config().default_headers.clone();
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        headers.extend(caller_headers);

        let payload = match json {
            Some(value) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                Some(serde_json::to_vec(&value)?)
            }
            None => body,
        };

        if let Some(provider) = self.token_provider()
            && let Some(token) = provider.token().await
            && !token.is_empty()
        {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::invalid_request(format!("Invalid bearer token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        if self.config().verbose {
            debug!(
                url = %url,
                body_length = payload.as_ref().map_or(0, Vec::len),
                "HTTP request"
            );
        }

        let mut request = self.client().request(method, &url).headers(headers);
        if let Some(payload) = payload {
            request = request.body(payload);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                let limit = timeout.unwrap_or(self.config().timeout);
                warn!(url = %url, timeout_ms = %limit.as_millis(), "HTTP request timed out");
                return Err(Error::timeout(format!(
                    "Request to {url} timed out after {}ms",
                    limit.as_millis()
                )));
            }
            Err(e) => {
                error!(error = %e, url = %url, "HTTP request send failed");
                return Err(e.into());
            }
        };

        self.process_response(response, &url).await
    }

    /// Executes a GET request.
    pub async fn get(&self, path: &str, options: ReadOptions) -> Result<ApiResponse> {
        self.request(path, options.into_request(Method::GET)).await
    }

    /// Executes a DELETE request.
    pub async fn delete(&self, path: &str, options: ReadOptions) -> Result<ApiResponse> {
        self.request(path, options.into_request(Method::DELETE)).await
    }

    /// Executes a POST request.
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(
            path,
            RequestOptions {
                method: Method::POST,
                ..options
            },
        )
        .await
    }

    /// Executes a PUT request.
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(
            path,
            RequestOptions {
                method: Method::PUT,
                ..options
            },
        )
        .await
    }

    /// Executes a PATCH request.
    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(
            path,
            RequestOptions {
                method: Method::PATCH,
                ..options
            },
        )
        .await
    }
}
