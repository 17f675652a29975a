//! Router assembly and request handlers

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{
    HeaderValue, CONTENT_TYPE, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokmeter_core::{models_by_family, CalculationResult};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

/// Upper bound on request text size, in characters.
const MAX_TEXT_CHARS: usize = 1_000_000;

/// Build the application router.
///
/// `allowed_origins` feeds the CORS layer; origins that fail to parse are
/// skipped with a warning rather than aborting startup.
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/calculate", post(calculate))
        .route("/api/models", get(models))
        .fallback(not_found)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CalculateRequest {
    text: Option<String>,
    model: Option<String>,
    #[serde(default = "default_preprocess")]
    preprocess_markdown: bool,
}

fn default_preprocess() -> bool {
    true
}

/// Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Count tokens for the given text and model.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, ApiError> {
    let Json(request) = payload
        .map_err(|_| ApiError::bad_request("Invalid request: No JSON data provided"))?;

    let text = request
        .text
        .ok_or_else(|| ApiError::bad_request("Missing required field: text"))?;
    let model = request
        .model
        .ok_or_else(|| ApiError::bad_request("Missing required field: model"))?;

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ApiError::bad_request(
            "Text too large. Maximum 1,000,000 characters.",
        ));
    }

    let calculator = state.calculator(request.preprocess_markdown);

    // The remote counting path blocks on I/O; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || calculator.count_detailed(&text, &model))
        .await
        .map_err(|_| ApiError::internal())??;

    Ok(Json(result))
}

/// Supported models grouped by backend family.
async fn models() -> Json<Value> {
    Json(json!({ "models": models_by_family() }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}
