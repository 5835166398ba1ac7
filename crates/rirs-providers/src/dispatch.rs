//! Request dispatch across the provider adapters.
//!
//! Exactly one adapter handles each request. There is no fan-out, no
//! fallback chaining, and no retry; a failed upstream call is the final
//! answer for that invocation.

use chrono::Utc;
use rirs_core::{
    context_preamble, ChatProvider, ChatReply, ChatRequest, GatewayResult, ProviderKind,
};
use tracing::debug;

use crate::brave::BraveProvider;
use crate::deepseek::DeepseekProvider;
use crate::gemini::GeminiProvider;

/// Routes validated chat requests to the selected provider adapter.
///
/// Holds one adapter per supported provider plus the location string woven
/// into the context preamble. Immutable after construction, so a single
/// router is shared across all in-flight requests.
pub struct ProviderRouter {
    gemini: GeminiProvider,
    deepseek: DeepseekProvider,
    brave: BraveProvider,
    location: String,
}

impl ProviderRouter {
    /// Create a router over the three provider adapters.
    pub fn new(
        gemini: GeminiProvider,
        deepseek: DeepseekProvider,
        brave: BraveProvider,
        location: impl Into<String>,
    ) -> Self {
        Self {
            gemini,
            deepseek,
            brave,
            location: location.into(),
        }
    }

    /// Location string used in the context preamble.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Validate the request, pick the provider, and produce the reply.
    ///
    /// Input faults (empty payload, unknown provider tag) are rejected
    /// before any preamble is built or any adapter is consulted.
    ///
    /// # Errors
    /// Any [`rirs_core::GatewayError`] from validation or the selected
    /// adapter.
    pub async fn dispatch(&self, request: &ChatRequest) -> GatewayResult<ChatReply> {
        request.ensure_payload()?;
        let kind = request.provider_kind()?;

        let preamble = if kind.accepts_preamble() {
            context_preamble(Utc::now(), &self.location)
        } else {
            String::new()
        };

        debug!(provider = %kind, "Dispatching chat request");

        let text = match kind {
            ProviderKind::Gemini => self.gemini.reply(request, &preamble).await?,
            ProviderKind::Deepseek => self.deepseek.reply(request, &preamble).await?,
            ProviderKind::Brave => self.brave.reply(request, &preamble).await?,
        };

        Ok(ChatReply::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BraveConfig, DeepseekConfig, GeminiConfig};
    use rirs_core::GatewayError;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOCATION: &str = "Kathmandu, Nepal";

    /// Router whose adapters all carry keys and point at the mock server.
    fn router_against(server: &MockServer) -> ProviderRouter {
        let gemini = GeminiProvider::new(
            GeminiConfig::new()
                .with_api_key("gemini-key")
                .with_base_url(server.uri()),
        )
        .expect("provider builds");
        let deepseek = DeepseekProvider::new(
            DeepseekConfig::new()
                .with_api_key("deepseek-key")
                .with_endpoint(format!("{}/v1/chat/completions", server.uri())),
        )
        .expect("provider builds");
        let brave = BraveProvider::new(
            BraveConfig::new()
                .with_api_key("brave-key")
                .with_endpoint(format!("{}/res/v1/web/search", server.uri())),
        )
        .expect("provider builds");

        ProviderRouter::new(gemini, deepseek, brave, LOCATION)
    }

    /// Router with no credentials configured at all.
    fn unconfigured_router() -> ProviderRouter {
        ProviderRouter::new(
            GeminiProvider::new(GeminiConfig::new()).expect("provider builds"),
            DeepseekProvider::new(DeepseekConfig::new()).expect("provider builds"),
            BraveProvider::new(BraveConfig::new()).expect("provider builds"),
            LOCATION,
        )
    }

    #[tokio::test]
    async fn test_dispatch_rejects_empty_payload() {
        let router = unconfigured_router();
        let err = router.dispatch(&ChatRequest::default()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "No message or query provided in the request"
        );
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_unknown_provider() {
        let router = unconfigured_router();
        let request = ChatRequest {
            message: Some("hello".to_string()),
            query: None,
            provider: Some("OpenAI".to_string()),
        };
        let err = router.dispatch(&request).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unsupported AI provider: openai. Supported: 'gemini', 'deepseek', 'brave'"
        );
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_dispatch_defaults_to_gemini() {
        // The credential error names the adapter that was reached.
        let router = unconfigured_router();
        let err = router
            .dispatch(&ChatRequest::with_message("hello"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY environment variable not set."
        );
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_provider_tag() {
        let router = unconfigured_router();

        let err = router
            .dispatch(&ChatRequest::with_message("hello").provider(ProviderKind::Deepseek))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "OPENROUTER_API_KEY environment variable not set."
        );

        let err = router
            .dispatch(&ChatRequest::with_query("rust news").provider(ProviderKind::Brave))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "BRAVE_API_KEY environment variable not set."
        );
    }

    #[tokio::test]
    async fn test_dispatch_requires_the_selected_providers_field() {
        // A query alone passes global validation but the default provider
        // reads `message`, so the gemini adapter rejects it.
        let router = unconfigured_router();
        let err = router
            .dispatch(&ChatRequest::with_query("rust news"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No message provided in the request");
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_dispatch_calls_exactly_one_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let router = router_against(&server);
        let reply = router
            .dispatch(&ChatRequest::with_message("hello"))
            .await
            .unwrap();

        assert_eq!(reply.reply, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_injects_preamble_into_text_providers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Current date and time:"))
            .and(body_string_contains(LOCATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "noted"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let router = router_against(&server);
        let reply = router
            .dispatch(&ChatRequest::with_message("hi").provider(ProviderKind::Deepseek))
            .await
            .unwrap();

        assert_eq!(reply.reply, "noted");
    }

    #[tokio::test]
    async fn test_dispatch_validation_precedes_credential_checks() {
        let router = unconfigured_router();
        let request = ChatRequest {
            message: None,
            query: None,
            provider: Some("gemini".to_string()),
        };
        let err = router.dispatch(&request).await.unwrap_err();

        assert!(matches!(err, GatewayError::MissingPayload { .. }));
    }
}
