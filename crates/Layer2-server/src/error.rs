//! API error responses
//!
//! Validation errors carry their message to the client; everything else is
//! logged and replaced with a generic message so internal detail (including
//! anything secret-adjacent from transport errors) never leaves the server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Error shape returned by every endpoint: `{"error": "..."}` plus status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An error occurred while processing your request.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<tokmeter_core::Error> for ApiError {
    fn from(err: tokmeter_core::Error) -> Self {
        if err.is_user_facing() {
            ApiError::bad_request(err.to_string())
        } else {
            error!(error = %err, "token calculation failed");
            ApiError::internal()
        }
    }
}
