//! Chat2Pay API
//!
//! Typed surface of the Chat2Pay backend, built on top of chat2pay-core:
//! authentication, the product catalogue and shopping assistant, merchants,
//! persisted chat history, orders, shipping, and the realtime chat socket.
//!
//! Every backend reply is wrapped in a `{status, data, error}` envelope;
//! [`BackendResponse`] unwraps it into `Result`.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat2pay_api::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let client = Chat2Pay::builder()
//!     .base_url("http://localhost:8080")
//!     .ws_url("ws://localhost:9005")
//!     .build()?;
//!
//! let reply = client.ask_product("batik shirt under 200k").await?;
//! println!("{} ({} products)", reply.message, reply.products.len());
//!
//! let socket = client
//!     .connect_chat("42", ChatCallbacks::new(|text| println!("{:?}", ChatFrame::parse(&text))))
//!     .await?;
//! socket.send("show me coffee beans");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow common patterns that are acceptable in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_field_names)]

// Re-export chat2pay-core
pub use chat2pay_core;

mod builder;
mod client;
pub mod constants;
mod envelope;
mod realtime;
mod rest;
pub mod types;

pub use builder::Chat2PayBuilder;
pub use client::Chat2Pay;
pub use envelope::BackendResponse;
pub use realtime::ChatFrame;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{BackendResponse, Chat2Pay, Chat2PayBuilder, ChatFrame};
    pub use chat2pay_core::prelude::*;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
