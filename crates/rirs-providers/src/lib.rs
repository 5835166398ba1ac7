//! # RiRs Providers
//!
//! Upstream adapters for the RiRs chat gateway.
//!
//! One adapter per provider:
//! - Gemini (Google generative-text API, the default provider)
//! - DeepSeek (chat completions relayed through OpenRouter)
//! - Brave (web search)
//!
//! Each adapter owns its wire format end to end and performs exactly one
//! HTTP call per request. The [`ProviderRouter`] picks the adapter from the
//! request's provider tag and wraps the extracted text into the normalized
//! reply envelope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod brave;
pub mod deepseek;
pub mod dispatch;
pub mod gemini;

// Re-export main types
pub use brave::{BraveConfig, BraveProvider};
pub use deepseek::{DeepseekConfig, DeepseekProvider};
pub use dispatch::ProviderRouter;
pub use gemini::{GeminiConfig, GeminiProvider};
