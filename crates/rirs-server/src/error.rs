//! API error responder for the HTTP surface.
//!
//! This is the single conversion boundary between the gateway's error
//! taxonomy and the wire: every failed handler returns an [`ApiError`],
//! which renders as `{ "error": <message> }` with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rirs_core::{ErrorBody, GatewayError};

/// Prefix applied to 500s that originate in an upstream provider call.
///
/// Configuration errors (a missing credential) surface their message bare.
const UPSTREAM_ERROR_PREFIX: &str = "Server error during AI API call: ";

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status for the response
    pub status: StatusCode,
    /// Message placed in the error envelope
    pub message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if err.is_upstream_fault() {
            format!("{UPSTREAM_ERROR_PREFIX}{err}")
        } else {
            err.to_string()
        };

        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}
