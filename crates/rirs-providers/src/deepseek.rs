//! DeepSeek provider implementation, relayed through OpenRouter.
//!
//! Speaks the OpenAI-style chat-completions shape: the context preamble
//! rides as a `system` message and the user text as a `user` message.

use async_trait::async_trait;
use reqwest::Client;
use rirs_core::{ChatProvider, ChatRequest, GatewayError, GatewayResult, ProviderKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Default OpenRouter chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openrouter.ai/v1/chat/completions";

/// Default DeepSeek model identifier on OpenRouter.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";

/// DeepSeek provider configuration.
#[derive(Debug, Clone)]
pub struct DeepseekConfig {
    /// API key; absence surfaces as a configuration error per request
    pub api_key: Option<SecretString>,
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DeepseekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl DeepseekConfig {
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

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
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

/// DeepSeek provider (OpenRouter relay).
pub struct DeepseekProvider {
    config: DeepseekConfig,
    client: Client,
}

impl DeepseekProvider {
    /// Create a new DeepSeek provider.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: DeepseekConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Build the chat-completions request body.
    fn transform_request(&self, preamble: &str, message: &str) -> DeepseekRequest {
        DeepseekRequest {
            model: self.config.model.clone(),
            messages: vec![
                DeepseekMessage {
                    role: "system".to_string(),
                    content: preamble.to_string(),
                },
                DeepseekMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
        }
    }

    /// Extract the reply text from a successful response body.
    ///
    /// An absent or empty `content` is treated as a shape violation, never
    /// returned as an empty reply.
    fn parse_response(body: &str) -> GatewayResult<String> {
        let response: DeepseekResponse = serde_json::from_str(body)
            .map_err(|_| GatewayError::unexpected_shape(ProviderKind::Deepseek))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| GatewayError::unexpected_shape(ProviderKind::Deepseek))?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ChatProvider for DeepseekProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Deepseek
    }

    async fn reply(&self, request: &ChatRequest, preamble: &str) -> GatewayResult<String> {
        let message = request
            .trimmed_message()
            .ok_or_else(|| GatewayError::missing_payload("No message provided in the request"))?;

        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            GatewayError::configuration("OPENROUTER_API_KEY environment variable not set.")
        })?;

        let body = self.transform_request(preamble, message);

        debug!(
            provider = "deepseek",
            model = %self.config.model,
            endpoint = %self.config.endpoint,
            "Sending chat-completions request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "deepseek", error = %e, "Deepseek API request failed");
                GatewayError::upstream(
                    ProviderKind::Deepseek,
                    None,
                    format!("Deepseek request failed: {e}"),
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            GatewayError::upstream(
                ProviderKind::Deepseek,
                Some(status.as_u16()),
                format!("Failed to read Deepseek response: {e}"),
            )
        })?;

        if !status.is_success() {
            error!(
                provider = "deepseek",
                status = status.as_u16(),
                "Deepseek API returned an error"
            );
            return Err(GatewayError::upstream(
                ProviderKind::Deepseek,
                Some(status.as_u16()),
                format!("Deepseek API returned an error: {text}"),
            ));
        }

        Self::parse_response(&text)
    }
}

// OpenRouter chat-completions wire types

#[derive(Debug, Serialize)]
struct DeepseekRequest {
    model: String,
    messages: Vec<DeepseekMessage>,
}

#[derive(Debug, Serialize)]
struct DeepseekMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct DeepseekResponse {
    #[serde(default)]
    choices: Vec<DeepseekChoice>,
}

#[derive(Debug, Deserialize)]
struct DeepseekChoice {
    message: DeepseekResponseMessage,
}

#[derive(Debug, Deserialize)]
struct DeepseekResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
