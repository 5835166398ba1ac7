//! # RiRs Config
//!
//! Configuration management for the RiRs chat gateway.
//!
//! Everything is environment-driven. Credentials are read once at startup
//! into [`ProviderSettings`] values that get injected into the adapters;
//! nothing in the request path touches the process environment. A missing
//! credential does not fail startup, the affected provider simply reports
//! its configuration error per request, so a keyless gateway still serves
//! input-validation responses and health checks.
//!
//! The lookup function is injectable so tests can exercise every branch
//! without mutating the environment.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rirs_core::ProviderKind;
use secrecy::SecretString;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable holding the Gemini credential.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the OpenRouter credential used for DeepSeek.
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
/// Environment variable holding the Brave Search credential.
pub const BRAVE_API_KEY_VAR: &str = "BRAVE_API_KEY";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOCATION: &str = "Kathmandu, Nepal";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The offending variable
        key: String,
        /// What went wrong
        message: String,
    },
}

/// Settings for one upstream provider.
///
/// `endpoint` and `model` are overrides; `None` means the adapter's
/// compiled-in default. The credential stays wrapped in a [`SecretString`]
/// until the adapter builds its request.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// API credential, when configured
    pub api_key: Option<SecretString>,
    /// Endpoint override, mainly for tests against mock upstreams
    pub endpoint: Option<String>,
    /// Model override
    pub model: Option<String>,
}

impl ProviderSettings {
    /// Create empty settings (provider unconfigured).
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

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the model override.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Whether a credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Top-level gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind host for the HTTP server
    pub host: String,
    /// Bind port for the HTTP server
    pub port: u16,
    /// Location embedded in the context preamble
    pub location: String,
    /// Per-request upstream timeout applied to every adapter
    pub upstream_timeout: Duration,
    /// Gemini settings
    pub gemini: ProviderSettings,
    /// DeepSeek (OpenRouter relay) settings
    pub deepseek: ProviderSettings,
    /// Brave Search settings
    pub brave: ProviderSettings,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            location: DEFAULT_LOCATION.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            gemini: ProviderSettings::new(),
            deepseek: ProviderSettings::new(),
            brave: ProviderSettings::new(),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration with all defaults and no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if `GATEWAY_PORT` or `GATEWAY_UPSTREAM_TIMEOUT_SECS`
    /// hold unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// # Errors
    /// Returns error if a numeric variable holds an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("GATEWAY_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            config.port = port.parse().map_err(|e| ConfigError::InvalidValue {
                key: "GATEWAY_PORT".to_string(),
                message: format!("{e}"),
            })?;
        }
        if let Some(location) = lookup("GATEWAY_LOCATION") {
            config.location = location;
        }
        if let Some(secs) = lookup("GATEWAY_UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|e| ConfigError::InvalidValue {
                key: "GATEWAY_UPSTREAM_TIMEOUT_SECS".to_string(),
                message: format!("{e}"),
            })?;
            config.upstream_timeout = Duration::from_secs(secs);
        }

        config.gemini = provider_settings_from(&lookup, GEMINI_API_KEY_VAR);
        config.deepseek = provider_settings_from(&lookup, OPENROUTER_API_KEY_VAR);
        config.brave = provider_settings_from(&lookup, BRAVE_API_KEY_VAR);

        Ok(config)
    }

    /// Set the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the preamble location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the upstream timeout.
    #[must_use]
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Settings for the given provider.
    #[must_use]
    pub fn provider(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Deepseek => &self.deepseek,
            ProviderKind::Brave => &self.brave,
        }
    }

    /// Providers that have a credential configured.
    #[must_use]
    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::all()
            .into_iter()
            .filter(|kind| self.provider(*kind).is_configured())
            .collect()
    }

    /// Address string the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn provider_settings_from<F>(lookup: &F, key_var: &str) -> ProviderSettings
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key_var).filter(|key| !key.trim().is_empty()) {
        Some(key) => ProviderSettings::new().with_api_key(key),
        None => {
            warn!(variable = key_var, "credential not set, provider will reject requests");
            ProviderSettings::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = GatewayConfig::from_lookup(|_| None).expect("defaults load");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.location, "Kathmandu, Nepal");
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(config.configured_providers().is_empty());
    }

    #[test]
    fn test_all_variables_applied() {
        let lookup = lookup_from(&[
            ("GATEWAY_HOST", "127.0.0.1"),
            ("GATEWAY_PORT", "9090"),
            ("GATEWAY_LOCATION", "Lisbon, Portugal"),
            ("GATEWAY_UPSTREAM_TIMEOUT_SECS", "15"),
            ("GEMINI_API_KEY", "g-key"),
            ("OPENROUTER_API_KEY", "or-key"),
            ("BRAVE_API_KEY", "b-key"),
        ]);
        let config = GatewayConfig::from_lookup(lookup).expect("config loads");

        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.location, "Lisbon, Portugal");
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert_eq!(
            config.configured_providers(),
            vec![
                ProviderKind::Gemini,
                ProviderKind::Deepseek,
                ProviderKind::Brave
            ]
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let lookup = lookup_from(&[("GATEWAY_PORT", "not-a-port")]);
        let err = GatewayConfig::from_lookup(lookup).unwrap_err();
        assert!(err.to_string().contains("GATEWAY_PORT"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let lookup = lookup_from(&[("GATEWAY_UPSTREAM_TIMEOUT_SECS", "soon")]);
        assert!(GatewayConfig::from_lookup(lookup).is_err());
    }

    #[test]
    fn test_blank_credential_counts_as_unconfigured() {
        let lookup = lookup_from(&[("GEMINI_API_KEY", "   ")]);
        let config = GatewayConfig::from_lookup(lookup).expect("config loads");
        assert!(!config.gemini.is_configured());
    }

    #[test]
    fn test_partial_credentials() {
        let lookup = lookup_from(&[("OPENROUTER_API_KEY", "or-key")]);
        let config = GatewayConfig::from_lookup(lookup).expect("config loads");

        assert!(!config.gemini.is_configured());
        assert!(config.deepseek.is_configured());
        assert!(!config.brave.is_configured());
        assert_eq!(config.configured_providers(), vec![ProviderKind::Deepseek]);
    }

    #[test]
    fn test_builder_setters() {
        let config = GatewayConfig::new()
            .with_host("localhost")
            .with_port(3000)
            .with_location("Berlin, Germany")
            .with_upstream_timeout(Duration::from_secs(5));

        assert_eq!(config.bind_addr(), "localhost:3000");
        assert_eq!(config.location, "Berlin, Germany");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_provider_settings_builder() {
        let settings = ProviderSettings::new()
            .with_api_key("secret")
            .with_endpoint("http://localhost:9999")
            .with_model("test-model");

        assert!(settings.is_configured());
        assert_eq!(settings.endpoint.as_deref(), Some("http://localhost:9999"));
        assert_eq!(settings.model.as_deref(), Some("test-model"));
    }
}
