//! Brave web-search provider implementation.
//!
//! Unlike the text providers this adapter performs a GET, authenticates via
//! the `X-Subscription-Token` header, and renders the top results as one
//! markdown string. It has no instruction slot, so it never receives the
//! context preamble.

use async_trait::async_trait;
use reqwest::Client;
use rirs_core::{ChatProvider, ChatRequest, GatewayError, GatewayResult, ProviderKind};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

/// Default Brave web-search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Maximum number of results rendered into the reply.
pub const RESULT_LIMIT: usize = 5;

/// Reply returned when the search succeeds but matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No web results found for that query.";

/// Brave Search provider configuration.
#[derive(Debug, Clone)]
pub struct BraveConfig {
    /// API key; absence surfaces as a configuration error per request
    pub api_key: Option<SecretString>,
    /// Search endpoint URL
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BraveConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl BraveConfig {
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

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Brave web-search provider.
pub struct BraveProvider {
    config: BraveConfig,
    client: Client,
}

impl BraveProvider {
    /// Create a new Brave Search provider.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: BraveConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Render a successful response body as one markdown reply.
    ///
    /// Takes at most [`RESULT_LIMIT`] results; a response with none yields
    /// [`NO_RESULTS_MESSAGE`], which is still a success.
    fn parse_response(body: &str) -> GatewayResult<String> {
        let response: BraveResponse = serde_json::from_str(body)
            .map_err(|_| GatewayError::unexpected_shape(ProviderKind::Brave))?;

        let results = response.web.map(|web| web.results).unwrap_or_default();
        if results.is_empty() {
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        let formatted = results
            .iter()
            .take(RESULT_LIMIT)
            .enumerate()
            .map(|(index, result)| {
                format!(
                    "{}. [{}]({})\n   {}",
                    index + 1,
                    result.title,
                    result.url,
                    result.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(formatted)
    }
}

#[async_trait]
impl ChatProvider for BraveProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Brave
    }

    async fn reply(&self, request: &ChatRequest, _preamble: &str) -> GatewayResult<String> {
        let query = request
            .trimmed_query()
            .ok_or_else(|| GatewayError::missing_payload("No query provided in the request"))?;

        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            GatewayError::configuration("BRAVE_API_KEY environment variable not set.")
        })?;

        debug!(provider = "brave", "Sending web-search request");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", query)])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                error!(provider = "brave", error = %e, "Brave Search request failed");
                GatewayError::upstream(
                    ProviderKind::Brave,
                    None,
                    format!("Brave Search request failed: {e}"),
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            GatewayError::upstream(
                ProviderKind::Brave,
                Some(status.as_u16()),
                format!("Failed to read Brave Search response: {e}"),
            )
        })?;

        if !status.is_success() {
            error!(
                provider = "brave",
                status = status.as_u16(),
                "Brave Search API returned an error"
            );
            return Err(GatewayError::upstream(
                ProviderKind::Brave,
                Some(status.as_u16()),
                format!("Brave Search API returned an error: {text}"),
            ));
        }

        Self::parse_response(&text)
    }
}

// Brave Search wire types

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
}
