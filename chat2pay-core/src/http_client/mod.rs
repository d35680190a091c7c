//! HTTP client for the Chat2Pay backend.
//!
//! A thin layer over `reqwest`:
//! - Relative paths resolved against a configured base URL
//! - Ordered query parameters with array and null handling
//! - JSON bodies and bearer token injection
//! - Non-2xx responses normalized into [`Error::Api`](crate::error::Error::Api)
//! - Response size limits
//!
//! The client never retries; wrap calls in
//! [`RetryStrategy::run`](crate::retry_strategy::RetryStrategy::run) when needed.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat2pay_core::http_client::{HttpClient, HttpConfig, Query, ReadOptions};
//!
//! # async fn example() -> chat2pay_core::Result<()> {
//! let client = HttpClient::new(HttpConfig::with_base_url("http://localhost:8080"))?;
//! let query = Query::new().with("page", 1).with("limit", 20);
//! let response = client.get("/api/products", ReadOptions::with_query(query)).await?;
//! println!("{:?}", response.data);
//! # Ok(())
//! # }
//! ```

mod auth;
mod builder;
mod config;
mod query;
mod request;
mod response;

#[cfg(test)]
mod tests;

pub use auth::{SessionToken, StaticToken, TokenProvider};
pub use builder::HttpClient;
pub use config::HttpConfig;
pub use query::{Query, QueryValue};
pub use request::{ReadOptions, RequestOptions, is_absolute_url};
pub use response::ApiResponse;
