//! HTTP client for the gateway.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::response::HealthResponse;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use rirs_core::{ChatReply, ChatRequest, ErrorBody, ProviderKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for the provider-routing gateway.
///
/// Every call translates to exactly one HTTP request. The gateway contract
/// has no retry semantics, so neither does the client: a failed call is
/// reported, never re-sent.
///
/// # Example
///
/// ```rust,no_run
/// use rirs_sdk::ChatClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), rirs_sdk::Error> {
///     let client = ChatClient::builder()
///         .base_url("http://localhost:8080")
///         .build()?;
///
///     let reply = client.send_message("Hello!").await?;
///     println!("{}", reply.reply);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ChatClient {
    /// HTTP client.
    http: reqwest::Client,
    /// Client configuration.
    config: Arc<ClientConfig>,
}

impl ChatClient {
    /// Create a new client builder.
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a chat request and return the normalized reply.
    #[instrument(skip(self, request), fields(provider = ?request.provider))]
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.url("/api/chat")?;

        debug!("Sending chat request to {}", url);

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Send a plain text-generation prompt to the default provider.
    pub async fn send_message(&self, message: impl Into<String>) -> Result<ChatReply> {
        self.send(&ChatRequest::with_message(message)).await
    }

    /// Send a web search, routed to the search provider.
    pub async fn search(&self, query: impl Into<String>) -> Result<ChatReply> {
        self.send(&ChatRequest::with_query(query).provider(ProviderKind::Brave))
            .await
    }

    /// Check the health of the gateway.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("/health")?;

        debug!("Checking health at {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Check if the gateway is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health().await.map(|h| h.is_healthy()).unwrap_or(false)
    }

    /// Check readiness of the gateway.
    ///
    /// Readiness is plain text: `ready` with a 200, or a 503 explaining
    /// what is missing (surfaced here as [`Error::Api`]).
    #[instrument(skip(self))]
    pub async fn ready(&self) -> Result<String> {
        let url = self.url("/ready")?;

        debug!("Checking readiness at {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if response.status().is_success() {
            response
                .text()
                .await
                .map_err(|e| self.map_reqwest_error(e))
        } else {
            Err(self.handle_error_response(response).await)
        }
    }

    /// Build a URL for the given path.
    fn url(&self, path: &str) -> Result<Url> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("Invalid URL path '{}': {}", path, e)))
    }

    /// Handle a successful response.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::parse(format!("Failed to parse response: {}", e)))
        } else {
            Err(self.handle_error_response(response).await)
        }
    }

    /// Handle an error response.
    ///
    /// The gateway wraps every failure in `{"error": ...}`; anything else
    /// (a proxy in the way, the plain-text readiness report) falls back to
    /// the raw body.
    async fn handle_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if let Ok(envelope) = serde_json::from_str::<ErrorBody>(&body) {
            return Error::api(status, envelope.error);
        }

        Error::api(
            status,
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body
            },
        )
    }

    /// Map a reqwest error to an SDK error.
    fn map_reqwest_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            Error::Connection {
                message: error.to_string(),
            }
        } else {
            Error::Http(error)
        }
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

/// Builder for creating a [`ChatClient`].
#[derive(Debug)]
pub struct ChatClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ChatClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            connect_timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// An unparseable base URL is a configuration error rather than a
    /// silent fallback, since the URL usually arrives from a flag or an
    /// environment variable.
    pub fn build(self) -> Result<ChatClient> {
        let base_url = match self.base_url {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| Error::configuration(format!("Invalid base URL '{}': {}", raw, e)))?,
            None => Url::parse("http://localhost:8080").expect("valid default URL"),
        };

        let config = ClientConfig {
            base_url,
            timeout: self.timeout.unwrap_or(ClientConfig::DEFAULT_TIMEOUT),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(ClientConfig::DEFAULT_CONNECT_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| ClientConfig::DEFAULT_USER_AGENT.to_string()),
        };

        ChatClient::new(config)
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_builder() {
        let client = ChatClient::builder()
            .base_url("http://localhost:8080")
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap();

        assert_eq!(client.config.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(client.config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_client_default_url() {
        let client = ChatClient::builder().build().unwrap();
        assert_eq!(client.config.base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ChatClient::builder()
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    async fn client_for(server: &MockServer) -> ChatClient {
        ChatClient::builder()
            .base_url(server.uri())
            .build()
            .expect("client builds")
    }

    #[tokio::test]
    async fn test_send_returns_normalized_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"message": "Hello!"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi there"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let reply = client.send_message("Hello!").await.unwrap();

        assert_eq!(reply.reply, "Hi there");
    }

    #[tokio::test]
    async fn test_search_selects_the_search_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(
                json!({"query": "rust news", "provider": "brave"}),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"reply": "1. [a](b)\n   c"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let reply = client.search("rust news").await.unwrap();

        assert!(reply.reply.starts_with("1."));
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "No message provided in the request"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.send_message("hi").await.unwrap_err();

        assert_eq!(err.status_code(), Some(400));
        assert_eq!(
            err.api_message(),
            Some("No message provided in the request")
        );
        assert!(err.is_input_fault());
    }

    #[tokio::test]
    async fn test_upstream_fault_surfaces_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                json!({"error": "Server error during AI API call: Deepseek API returned an error: rate limited"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.send_message("hi").await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert!(!err.is_input_fault());
        assert!(err
            .to_string()
            .contains("Server error during AI API call"));
    }

    #[tokio::test]
    async fn test_failed_call_is_not_retried() {
        let server = MockServer::start().await;
        // expect(1) turns a second POST into a test failure.
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.send_message("hi").await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_health_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "healthy", "version": "0.1.0"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let health = client.health().await.unwrap();

        assert!(health.is_healthy());
        assert_eq!(health.version.as_deref(), Some("0.1.0"));
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_readiness_plain_text_passthrough() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ready"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.ready().await.unwrap(), "ready");
    }

    #[tokio::test]
    async fn test_unready_gateway_reports_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(503).set_body_string("no providers configured"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.ready().await.unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.api_message(), Some("no providers configured"));
    }
}
