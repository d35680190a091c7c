//! # Chat2Pay Rust
//!
//! Client for the Chat2Pay conversational commerce backend.
//!
//! ## Features
//!
//! - **HTTP API client**: base URL resolution, ordered queries, JSON bodies,
//!   bearer tokens and typed errors
//! - **Realtime chat**: a supervised WebSocket connection with bounded linear
//!   reconnect and explicit cancellation
//! - **Typed backend surface**: auth, catalogue, chat history, orders and
//!   shipping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat2pay_rust::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     init_logging(&LogConfig::development());
//!
//!     let client = Chat2PayBuilder::from_env().build()?;
//!     let provinces = client.fetch_provinces().await?;
//!     println!("{} provinces", provinces.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export core types and the typed client
pub use chat2pay_api::{BackendResponse, Chat2Pay, Chat2PayBuilder, ChatFrame, types};
pub use chat2pay_core::{
    ChatCallbacks, ChatConnectConfig, ChatConnectionState, ChatSocket, ChatSocketConfig,
    HttpClient, HttpConfig, Query, QueryValue, ReadOptions, RequestOptions, RetryConfig,
    RuntimeConfig,
    error::{Error, Result},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use chat2pay_api::prelude::*;
}
