//! HTTP error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use component_analysis::ExportError;
use component_generation::{GenerationError, ValidationIssue};

use crate::constants::messages;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request failed validation; details are returned to the client
    #[error("Invalid request")]
    Invalid(Vec<ValidationIssue>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(vec![ValidationIssue {
            field: "body",
            message: rejection.body_text(),
        }])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Invalid(issues) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": messages::INVALID_REQUEST, "details": issues }),
            ),
            ApiError::Generation(GenerationError::Invalid(issues)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": messages::INVALID_REQUEST, "details": issues }),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": message }))
            }
            ApiError::Export(ExportError::Empty) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": self.to_string() }),
            ),
            ApiError::Generation(_) => {
                log::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": messages::GENERATION_FAILED }),
                )
            }
            ApiError::Export(_) | ApiError::Internal(_) => {
                log::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
