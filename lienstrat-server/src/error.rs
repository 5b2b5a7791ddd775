use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use lienstrat_core::AiError;

pub const UPSTREAM_FAILURE_DETAIL: &str = "OpenAI request failed.";
pub const NOT_CONFIGURED_DETAIL: &str = "OpenAI API key not configured.";

/// One rejected request field.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    pub fn body(field: Option<&str>, msg: impl Into<String>, kind: &str) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(field.map(str::to_string));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// The request body failed schema checks; no service was called.
    Validation(Vec<ValidationIssue>),
    NotConfigured,
    Ai(AiError),
}

impl From<AiError> for ApiError {
    fn from(error: AiError) -> Self {
        ApiError::Ai(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Ai(AiError::InvalidArgument(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Ai(AiError::UpstreamContractViolation(_))
            | ApiError::Ai(AiError::UpstreamUnavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(issues) => json!({ "detail": issues }),
            ApiError::NotConfigured => json!({ "detail": NOT_CONFIGURED_DETAIL }),
            ApiError::Ai(AiError::InvalidArgument(message)) => json!({ "detail": message }),
            ApiError::Ai(AiError::UpstreamContractViolation(message)) => {
                tracing::warn!(detail = %message, "upstream response rejected");
                json!({ "detail": message })
            }
            ApiError::Ai(AiError::UpstreamUnavailable(message)) => {
                // Provider detail stays in the logs.
                tracing::error!(error = %message, "upstream request failed");
                json!({ "detail": UPSTREAM_FAILURE_DETAIL })
            }
        };
        (status, Json(body)).into_response()
    }
}
