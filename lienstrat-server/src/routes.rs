use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use lienstrat_core::{CompletionResult, EmbeddingResult};

use crate::schemas::{EmbeddingsPayload, TextGenerationPayload};
use crate::{ApiError, AppState, Settings, ValidationIssue};

/// Builds the full application: `/health` plus the AI routes under the
/// versioned API prefix.
pub fn router(state: AppState, settings: &Settings) -> Router {
    let ai = Router::new()
        .route("/ai/responses", post(create_text_response))
        .route("/ai/embeddings", post(create_embeddings));

    Router::new()
        .route("/health", get(health))
        .nest(&settings.api_v1_path(), ai)
        .layer(cors_layer(&settings.cors_allow_origins))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn create_text_response(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CompletionResult>, ApiError> {
    let service = state.text()?;
    let request = TextGenerationPayload::from_json(&body(payload)?)
        .and_then(TextGenerationPayload::validate)
        .map_err(ApiError::Validation)?;
    let result = service.generate_text(request).await?;
    Ok(Json(result))
}

async fn create_embeddings(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EmbeddingResult>, ApiError> {
    let service = state.embeddings()?;
    let request = EmbeddingsPayload::from_json(&body(payload)?)
        .and_then(EmbeddingsPayload::validate)
        .map_err(ApiError::Validation)?;
    let result = service.create_embeddings(request).await?;
    Ok(Json(result))
}

/// Unreadable bodies (bad syntax, wrong content type) are reported at the
/// body root; field problems are located by the payload decoders.
fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ApiError::Validation(vec![ValidationIssue::body(
            None,
            rejection.body_text(),
            "json_invalid",
        )])
    })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    // Credentialed requests cannot use a literal `*`, so the wildcard echoes
    // the caller's origin back.
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
