//! # RiRs Core
//!
//! Core types, traits, and error handling for the RiRs chat gateway.
//!
//! This crate provides the foundational pieces shared by the server, the
//! provider adapters, and the client SDK:
//! - The inbound chat request and the normalized reply envelope
//! - The provider selector and the adapter trait
//! - The gateway error taxonomy with its HTTP status mapping
//! - The context preamble builder

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod preamble;
pub mod provider;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use error::{GatewayError, GatewayResult};
pub use preamble::context_preamble;
pub use provider::{ChatProvider, ProviderKind};
pub use request::ChatRequest;
pub use response::{ChatReply, ErrorBody};
