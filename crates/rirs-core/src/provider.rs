//! Provider selector and the adapter trait.

use crate::error::{GatewayError, GatewayResult};
use crate::request::ChatRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of upstream providers the gateway can dispatch to.
///
/// Unrecognized tags are a terminal error, never a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini text generation (the default)
    #[default]
    Gemini,
    /// DeepSeek chat completions relayed through OpenRouter
    Deepseek,
    /// Brave web search
    Brave,
}

impl ProviderKind {
    /// All supported providers, in dispatch-preference order.
    #[must_use]
    pub fn all() -> [Self; 3] {
        [Self::Gemini, Self::Deepseek, Self::Brave]
    }

    /// Wire tag for this provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Deepseek => "deepseek",
            Self::Brave => "brave",
        }
    }

    /// Capitalized name used in user-facing messages.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Deepseek => "Deepseek",
            Self::Brave => "Brave",
        }
    }

    /// Whether the context preamble can be injected into this provider's
    /// request. The web-search upstream has no instruction slot.
    #[must_use]
    pub fn accepts_preamble(&self) -> bool {
        !matches!(self, Self::Brave)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "gemini" => Ok(Self::Gemini),
            "deepseek" => Ok(Self::Deepseek),
            "brave" => Ok(Self::Brave),
            _ => Err(GatewayError::unsupported_provider(normalized)),
        }
    }
}

/// A single upstream adapter.
///
/// Each implementation owns its wire format: it builds the provider-specific
/// request from the inbound one, performs exactly one HTTP call, and extracts
/// the reply text from the provider-specific response. Required-field and
/// credential checks happen here, before any network I/O.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Which upstream this adapter speaks to.
    fn kind(&self) -> ProviderKind;

    /// Forward the request upstream and return the extracted reply text.
    ///
    /// `preamble` is the context preamble for the current request; adapters
    /// whose upstream has no instruction slot ignore it.
    async fn reply(&self, request: &ChatRequest, preamble: &str) -> GatewayResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!("gemini".parse::<ProviderKind>().ok(), Some(ProviderKind::Gemini));
        assert_eq!(
            "deepseek".parse::<ProviderKind>().ok(),
            Some(ProviderKind::Deepseek)
        );
        assert_eq!("brave".parse::<ProviderKind>().ok(), Some(ProviderKind::Brave));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!("GEMINI".parse::<ProviderKind>().ok(), Some(ProviderKind::Gemini));
        assert_eq!(
            "  DeepSeek  ".parse::<ProviderKind>().ok(),
            Some(ProviderKind::Deepseek)
        );
    }

    #[test]
    fn test_parse_unknown_provider_carries_normalized_tag() {
        let err = "OpenAI".parse::<ProviderKind>().unwrap_err();
        match err {
            GatewayError::UnsupportedProvider { requested } => assert_eq!(requested, "openai"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_default_is_gemini() {
        assert_eq!(ProviderKind::default(), ProviderKind::Gemini);
    }

    #[test]
    fn test_preamble_capability() {
        assert!(ProviderKind::Gemini.accepts_preamble());
        assert!(ProviderKind::Deepseek.accepts_preamble());
        assert!(!ProviderKind::Brave.accepts_preamble());
    }

    #[test]
    fn test_display_matches_wire_tag() {
        for kind in ProviderKind::all() {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
