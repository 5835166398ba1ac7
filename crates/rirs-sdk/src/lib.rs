//! # RiRs Gateway SDK
//!
//! A Rust client for the RiRs provider-routing gateway.
//!
//! ## Features
//!
//! - Async-first design with full `tokio` support
//! - One HTTP call per request, no hidden retries
//! - Typed errors carrying the gateway's status and message
//! - Per-request provider selection (`gemini`, `deepseek`, `brave`)
//! - Builder pattern for easy configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rirs_sdk::ChatClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rirs_sdk::Error> {
//!     let client = ChatClient::builder()
//!         .base_url("http://localhost:8080")
//!         .build()?;
//!
//!     let reply = client.send_message("Hello, world!").await?;
//!     println!("{}", reply.reply);
//!     Ok(())
//! }
//! ```
//!
//! ## Web Search
//!
//! ```rust,no_run
//! use rirs_sdk::ChatClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rirs_sdk::Error> {
//!     let client = ChatClient::builder()
//!         .base_url("http://localhost:8080")
//!         .build()?;
//!
//!     let results = client.search("rust web frameworks").await?;
//!     println!("{}", results.reply);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
mod error;
mod response;

pub use client::{ChatClient, ChatClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use response::HealthResponse;

// Re-export core types for convenience
pub use rirs_core::{ChatReply, ChatRequest, ErrorBody, ProviderKind};
