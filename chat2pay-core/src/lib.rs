//! Chat2Pay Core Library
//!
//! Transport plumbing for the Chat2Pay client: the HTTP API client, the
//! realtime chat socket, and the error, retry, logging and configuration
//! layers they share.
//!
//! # Features
//!
//! - **HTTP**: base URL resolution, ordered queries, JSON bodies, bearer tokens,
//!   typed errors for non-2xx responses
//! - **Realtime chat**: one owned connection per [`ChatSocket`] with bounded
//!   linear reconnect and explicit cancellation
//! - **Error Handling**: Comprehensive error types with `thiserror`
//!
//! # Example
//!
//! ```rust,no_run
//! use chat2pay_core::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let config = RuntimeConfig::from_env();
//! let client = HttpClient::new(HttpConfig::with_base_url(&config.api_base_url))?;
//! let merchants = client.get("/api/merchants", ReadOptions::default()).await?;
//! println!("{:?}", merchants.data);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// =============================================================================
// Global Clippy Lint Suppressions
// =============================================================================
// - module_name_repetitions: Common pattern in Rust libraries (e.g., ChatSocketConfig in chat_socket)
// - missing_errors_doc: Too verbose to document every Result-returning function
// - missing_panics_doc: Too verbose to document every potential panic
// - must_use_candidate: Not all return values need #[must_use]
// - doc_markdown: Technical terms in docs don't need backticks
// - cast_possible_truncation: usize/u64 conversions of byte counts
// - return_self_not_must_use: Builder pattern methods return Self without must_use
// =============================================================================
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]

// Re-exports of external dependencies
pub use rust_decimal;
pub use serde;
pub use serde_json;

// Core modules
pub mod chat_socket;
pub mod config;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod retry_strategy;

pub use chat_socket::{
    ChatCallbacks, ChatConnectConfig, ChatConnectionState, ChatSocket, ChatSocketConfig,
    ChatSocketStatsSnapshot,
};
pub use config::{ProxyConfig, RuntimeConfig};
pub use error::{ApiErrorDetails, ContextExt, Error, NetworkError, ParseError, Result};
pub use http_client::{
    ApiResponse, HttpClient, HttpConfig, Query, QueryValue, ReadOptions, RequestOptions,
    SessionToken, StaticToken, TokenProvider,
};
pub use retry_strategy::{RetryConfig, RetryStrategy, RetryStrategyType};
pub use tokio_util::sync::CancellationToken;

/// Prelude module for convenient imports
///
/// ```rust
/// use chat2pay_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chat_socket::{
        ChatCallbacks, ChatConnectConfig, ChatConnectionState, ChatSocket, ChatSocketConfig,
        ChatSocketStatsSnapshot,
    };
    pub use crate::config::{ProxyConfig, RuntimeConfig};
    pub use crate::error::{ApiErrorDetails, ContextExt, Error, Result};
    pub use crate::http_client::{
        ApiResponse, HttpClient, HttpConfig, Query, QueryValue, ReadOptions, RequestOptions,
        SessionToken, StaticToken, TokenProvider,
    };
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::retry_strategy::{RetryConfig, RetryStrategy, RetryStrategyType};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
