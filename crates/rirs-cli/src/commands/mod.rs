//! CLI commands module.

pub mod chat;
pub mod health;
