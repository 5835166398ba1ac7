//! Shared application state.

use std::sync::Arc;

use rirs_config::GatewayConfig;
use rirs_core::{GatewayResult, ProviderKind};
use rirs_providers::{
    BraveConfig, BraveProvider, DeepseekConfig, DeepseekProvider, GeminiConfig, GeminiProvider,
    ProviderRouter,
};
use secrecy::ExposeSecret;

/// State shared by every handler.
///
/// Built once at startup and immutable afterwards, so concurrent requests
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<GatewayConfig>,
    /// Provider router
    pub router: Arc<ProviderRouter>,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// Providers without a credential are still constructed; they answer
    /// with a configuration error when selected.
    ///
    /// # Errors
    /// Returns error if an adapter's HTTP client cannot be constructed.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let gemini = GeminiProvider::new(gemini_config(&config))?;
        let deepseek = DeepseekProvider::new(deepseek_config(&config))?;
        let brave = BraveProvider::new(brave_config(&config))?;
        let router = ProviderRouter::new(gemini, deepseek, brave, config.location.clone());

        Ok(Self {
            config: Arc::new(config),
            router: Arc::new(router),
        })
    }
}

fn gemini_config(config: &GatewayConfig) -> GeminiConfig {
    let settings = config.provider(ProviderKind::Gemini);
    let mut provider_config = GeminiConfig::new().with_timeout(config.upstream_timeout);
    if let Some(key) = &settings.api_key {
        provider_config = provider_config.with_api_key(key.expose_secret().as_str());
    }
    if let Some(endpoint) = &settings.endpoint {
        provider_config = provider_config.with_base_url(endpoint);
    }
    if let Some(model) = &settings.model {
        provider_config = provider_config.with_model(model);
    }
    provider_config
}

fn deepseek_config(config: &GatewayConfig) -> DeepseekConfig {
    let settings = config.provider(ProviderKind::Deepseek);
    let mut provider_config = DeepseekConfig::new().with_timeout(config.upstream_timeout);
    if let Some(key) = &settings.api_key {
        provider_config = provider_config.with_api_key(key.expose_secret().as_str());
    }
    if let Some(endpoint) = &settings.endpoint {
        provider_config = provider_config.with_endpoint(endpoint);
    }
    if let Some(model) = &settings.model {
        provider_config = provider_config.with_model(model);
    }
    provider_config
}

fn brave_config(config: &GatewayConfig) -> BraveConfig {
    let settings = config.provider(ProviderKind::Brave);
    let mut provider_config = BraveConfig::new().with_timeout(config.upstream_timeout);
    if let Some(key) = &settings.api_key {
        provider_config = provider_config.with_api_key(key.expose_secret().as_str());
    }
    if let Some(endpoint) = &settings.endpoint {
        provider_config = provider_config.with_endpoint(endpoint);
    }
    provider_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use rirs_config::ProviderSettings;
    use std::time::Duration;

    #[test]
    fn test_state_builds_without_credentials() {
        let state = AppState::new(GatewayConfig::default()).expect("state builds");
        assert_eq!(state.config.configured_providers().len(), 0);
        assert_eq!(state.router.location(), "Kathmandu, Nepal");
    }

    #[test]
    fn test_provider_settings_map_into_adapter_configs() {
        let mut config = GatewayConfig::new().with_upstream_timeout(Duration::from_secs(5));
        config.gemini = ProviderSettings::new()
            .with_api_key("g-key")
            .with_endpoint("http://localhost:9000")
            .with_model("gemini-test");

        let gemini = gemini_config(&config);
        assert!(gemini.api_key.is_some());
        assert_eq!(gemini.base_url, "http://localhost:9000");
        assert_eq!(gemini.model, "gemini-test");
        assert_eq!(gemini.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_unconfigured_providers_carry_no_key() {
        let config = GatewayConfig::default();
        assert!(gemini_config(&config).api_key.is_none());
        assert!(deepseek_config(&config).api_key.is_none());
        assert!(brave_config(&config).api_key.is_none());
    }
}
