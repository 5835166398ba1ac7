//! # RiRs Gateway
//!
//! Stateless AI chat gateway. Every request to `POST /api/chat` is routed
//! to exactly one upstream: Gemini text generation, DeepSeek chat relayed
//! through OpenRouter, or Brave web search.
//!
//! ## Usage
//!
//! ```bash
//! # Start with default configuration
//! rirs-gateway
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 rirs-gateway
//! ```

use rirs_config::GatewayConfig;
use rirs_core::ProviderKind;
use rirs_server::{create_router, init_logging, shutdown_signal, AppState, LoggingConfig};
use tracing::{error, info, warn};

/// Application entry point
#[tokio::main]
async fn main() {
    // Initialize logging first
    if let Err(e) = init_logging(&LoggingConfig::new().with_level("info")) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting RiRs Gateway");

    // Run the application
    if let Err(e) = run().await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    info!(
        host = %config.host,
        port = config.port,
        location = %config.location,
        "Configuration loaded"
    );

    // A provider without a credential still serves requests; each one is
    // answered with a configuration error instead of failing startup.
    for kind in ProviderKind::all() {
        if !config.provider(kind).is_configured() {
            warn!(provider = %kind, "API key not set, provider unavailable");
        }
    }

    let addr = config.bind_addr();
    let state = AppState::new(config)?;

    info!(
        providers = state.config.configured_providers().len(),
        "Provider adapters initialized"
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Gateway server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway server stopped");

    Ok(())
}
