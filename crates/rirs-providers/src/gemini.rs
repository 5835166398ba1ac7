//! Google Gemini provider implementation.
//!
//! Talks to the Google AI Studio generate-content API:
//! `https://generativelanguage.googleapis.com/v1beta/models/{MODEL}:generateContent?key={KEY}`
//!
//! Gemini has no separate system slot in this call shape, so the context
//! preamble is prepended to the user message as one combined prompt.

use async_trait::async_trait;
use reqwest::Client;
use rirs_core::{ChatProvider, ChatRequest, GatewayError, GatewayResult, ProviderKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Default Google AI Studio base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; absence surfaces as a configuration error per request
    pub api_key: Option<SecretString>,
    /// API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiConfig {
    /// Create a configuration with defaults and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Google Gemini provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: GeminiConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Build the endpoint URL. The key rides in the query string, so the
    /// result must never be logged.
    fn endpoint_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        )
    }

    /// Build the upstream request from the preamble and the user message.
    fn transform_request(preamble: &str, message: &str) -> GeminiRequest {
        let prompt = format!("{preamble}\n\n{message}");
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt,
                }],
            }],
        }
    }

    /// Extract the reply text from a successful response body.
    fn parse_response(body: &str) -> GatewayResult<String> {
        let response: GeminiResponse = serde_json::from_str(body)
            .map_err(|_| GatewayError::unexpected_shape(ProviderKind::Gemini))?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::unexpected_shape(ProviderKind::Gemini))?;

        if candidate.content.parts.is_empty() {
            return Err(GatewayError::unexpected_shape(ProviderKind::Gemini));
        }

        let text = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn reply(&self, request: &ChatRequest, preamble: &str) -> GatewayResult<String> {
        let message = request
            .trimmed_message()
            .ok_or_else(|| GatewayError::missing_payload("No message provided in the request"))?;

        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            GatewayError::configuration("GEMINI_API_KEY environment variable not set.")
        })?;

        let url = self.endpoint_url(api_key.expose_secret());
        let gemini_request = Self::transform_request(preamble, message);

        debug!(
            provider = "gemini",
            model = %self.config.model,
            "Sending generate-content request"
        );

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "gemini", error = %e, "Gemini API request failed");
                GatewayError::upstream(
                    ProviderKind::Gemini,
                    None,
                    format!("Gemini request failed: {e}"),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            GatewayError::upstream(
                ProviderKind::Gemini,
                Some(status.as_u16()),
                format!("Failed to read Gemini response: {e}"),
            )
        })?;

        if !status.is_success() {
            error!(provider = "gemini", status = status.as_u16(), "Gemini API returned an error");
            return Err(GatewayError::upstream(
                ProviderKind::Gemini,
                Some(status.as_u16()),
                format!("Gemini API returned an error: {body}"),
            ));
        }

        Self::parse_response(&body)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
