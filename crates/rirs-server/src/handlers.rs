//! HTTP request handlers for the gateway API.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rirs_core::{ChatReply, ChatRequest};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::{
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint
///
/// The gateway is ready as soon as at least one provider carries a
/// credential; a gateway with none can only answer input faults.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let configured = state.config.configured_providers().len();

    if configured > 0 {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "no providers configured")
    }
}

/// Liveness check endpoint
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}

/// Chat endpoint: validate, route to exactly one provider, normalize.
#[instrument(skip(state, body), fields(provider = ?body.provider))]
pub async fn chat(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(body): JsonBody<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    debug!(request_id = %request_id, "Processing chat request");

    let start = Instant::now();

    match state.router.dispatch(&body).await {
        Ok(reply) => {
            info!(
                request_id = %request_id,
                duration_ms = start.elapsed().as_millis(),
                "Chat request completed"
            );
            Ok(Json(reply))
        }
        Err(e) if e.is_client_error() => {
            debug!(request_id = %request_id, error = %e, "Chat request rejected");
            Err(e.into())
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Chat request failed");
            Err(e.into())
        }
    }
}
