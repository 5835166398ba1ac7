//! Error types for the gateway.
//!
//! Every failure mode in the request path maps to exactly one variant here,
//! and every variant maps to exactly one HTTP status. Input faults are 400s,
//! configuration and upstream faults are 500s.

use crate::provider::ProviderKind;
use thiserror::Error;

/// Result alias used throughout the gateway crates.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error taxonomy.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body was not valid JSON.
    #[error("{message}")]
    MalformedInput {
        /// Human-readable description of the parse failure
        message: String,
    },

    /// The request parsed but carried no usable payload field.
    #[error("{message}")]
    MissingPayload {
        /// Which field was missing
        message: String,
    },

    /// The provider tag is not one of the supported set.
    #[error("Unsupported AI provider: {requested}. Supported: 'gemini', 'deepseek', 'brave'")]
    UnsupportedProvider {
        /// The tag the caller sent, lower-cased
        requested: String,
    },

    /// A credential or setting required by the selected provider is absent.
    #[error("{message}")]
    Configuration {
        /// Which setting is missing
        message: String,
    },

    /// The upstream call failed or returned a non-success status.
    #[error("{message}")]
    Upstream {
        /// Provider whose upstream failed
        provider: ProviderKind,
        /// HTTP status from the upstream, when one was received
        status: Option<u16>,
        /// Upstream error text
        message: String,
    },

    /// The upstream returned 2xx but the body did not match the expected schema.
    #[error("Unexpected {} API response structure.", .provider.display_name())]
    UnexpectedShape {
        /// Provider whose response could not be parsed
        provider: ProviderKind,
    },
}

impl GatewayError {
    /// Malformed input error (unparseable request body).
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Missing payload error.
    pub fn missing_payload(message: impl Into<String>) -> Self {
        Self::MissingPayload {
            message: message.into(),
        }
    }

    /// Unsupported provider error.
    pub fn unsupported_provider(requested: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            requested: requested.into(),
        }
    }

    /// Configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Upstream error with an optional HTTP status.
    pub fn upstream(
        provider: ProviderKind,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            provider,
            status,
            message: message.into(),
        }
    }

    /// Unexpected response shape error.
    #[must_use]
    pub fn unexpected_shape(provider: ProviderKind) -> Self {
        Self::UnexpectedShape { provider }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedInput { .. }
            | Self::MissingPayload { .. }
            | Self::UnsupportedProvider { .. } => 400,
            Self::Configuration { .. } | Self::Upstream { .. } | Self::UnexpectedShape { .. } => {
                500
            }
        }
    }

    /// Whether this error is the caller's fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Whether this error originated in an upstream call.
    ///
    /// The server wraps these in its outer error message; configuration
    /// errors surface their message as-is.
    #[must_use]
    pub fn is_upstream_fault(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::UnexpectedShape { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::malformed_input("Invalid JSON in request body").status_code(),
            400
        );
        assert_eq!(
            GatewayError::missing_payload("No message provided in the request").status_code(),
            400
        );
        assert_eq!(
            GatewayError::unsupported_provider("openai").status_code(),
            400
        );
        assert_eq!(
            GatewayError::configuration("GEMINI_API_KEY environment variable not set.")
                .status_code(),
            500
        );
        assert_eq!(
            GatewayError::upstream(ProviderKind::Deepseek, Some(503), "rate limited").status_code(),
            500
        );
        assert_eq!(
            GatewayError::unexpected_shape(ProviderKind::Deepseek).status_code(),
            500
        );
    }

    #[test]
    fn test_unsupported_provider_message_lists_supported_set() {
        let err = GatewayError::unsupported_provider("openai");
        assert_eq!(
            err.to_string(),
            "Unsupported AI provider: openai. Supported: 'gemini', 'deepseek', 'brave'"
        );
    }

    #[test]
    fn test_unexpected_shape_message() {
        let err = GatewayError::unexpected_shape(ProviderKind::Deepseek);
        assert_eq!(err.to_string(), "Unexpected Deepseek API response structure.");

        let err = GatewayError::unexpected_shape(ProviderKind::Gemini);
        assert_eq!(err.to_string(), "Unexpected Gemini API response structure.");
    }

    #[test]
    fn test_upstream_fault_classification() {
        assert!(GatewayError::upstream(ProviderKind::Brave, None, "boom").is_upstream_fault());
        assert!(GatewayError::unexpected_shape(ProviderKind::Gemini).is_upstream_fault());
        assert!(!GatewayError::configuration("missing key").is_upstream_fault());
        assert!(!GatewayError::missing_payload("no message").is_upstream_fault());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(GatewayError::malformed_input("bad json").is_client_error());
        assert!(!GatewayError::configuration("missing key").is_client_error());
    }
}
