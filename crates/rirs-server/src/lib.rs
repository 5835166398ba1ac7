//! # RiRs Gateway Server
//!
//! HTTP server for the RiRs chat gateway.
//!
//! This crate provides:
//! - Axum-based HTTP surface (`POST /api/chat` plus health endpoints)
//! - Request extraction and the `{ "error": ... }` envelope
//! - Provider dispatch wiring via shared application state
//! - Logging initialization
//! - Graceful shutdown handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod shutdown;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use routes::create_router;
pub use shutdown::shutdown_signal;
pub use state::AppState;
