//! Response envelopes for the chat endpoint.
//!
//! Success is always `{"reply": ...}` and failure is always `{"error": ...}`,
//! regardless of which provider handled the request.

use serde::{Deserialize, Serialize};

/// The normalized success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text extracted from the provider response
    pub reply: String,
}

impl ChatReply {
    /// Wrap extracted reply text.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// The error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error description
    pub error: String,
}

impl ErrorBody {
    /// Wrap an error message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
