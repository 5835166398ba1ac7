//! The inbound chat request.
//!
//! One shape serves all three providers: text generation reads `message`,
//! web search reads `query`, and `provider` selects the upstream. Unknown
//! fields are ignored so UI revisions can add payload keys without breaking
//! older gateways.

use crate::error::{GatewayError, GatewayResult};
use crate::provider::ProviderKind;
use serde::{Deserialize, Serialize};

/// Inbound request body for the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Prompt for the text-generation providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Search terms for the web-search provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Provider tag; absent or empty defaults to `gemini`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ChatRequest {
    /// Create a request carrying a text-generation prompt.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            query: None,
            provider: None,
        }
    }

    /// Create a request carrying web-search terms.
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            message: None,
            query: Some(query.into()),
            provider: None,
        }
    }

    /// Set the provider tag.
    #[must_use]
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider.as_str().to_string());
        self
    }

    /// The message, trimmed, if it is non-empty.
    #[must_use]
    pub fn trimmed_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// The query, trimmed, if it is non-empty.
    #[must_use]
    pub fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Resolve the provider tag to a [`ProviderKind`].
    ///
    /// Absent or whitespace-only tags fall back to the default provider;
    /// anything else must parse or the request is rejected.
    pub fn provider_kind(&self) -> GatewayResult<ProviderKind> {
        match self.provider.as_deref().map(str::trim) {
            None | Some("") => Ok(ProviderKind::default()),
            Some(tag) => tag.parse(),
        }
    }

    /// Reject requests that carry no usable payload field.
    ///
    /// This runs before provider resolution and before any credential check,
    /// so a gateway with no keys configured still answers input faults
    /// with a 400.
    pub fn ensure_payload(&self) -> GatewayResult<()> {
        if self.trimmed_message().is_none() && self.trimmed_query().is_none() {
            return Err(GatewayError::missing_payload(
                "No message or query provided in the request",
            ));
        }
        Ok(())
    }
}
