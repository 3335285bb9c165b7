//! Error types for component generation

use serde::Serialize;
use thiserror::Error;

/// One problem found while validating a generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Field the issue applies to
    pub field: &'static str,
    pub message: String,
}

/// Errors raised while talking to a generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key, so no backend to call
    #[error("No generation backend configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A streamed event could not be decoded
    #[error("Malformed stream event: {0}")]
    Stream(String),

    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider finished the stream with an error
    #[error("Generation aborted: {0}")]
    Aborted(String),

    #[error("Invalid request")]
    Invalid(Vec<ValidationIssue>),
}

impl GenerationError {
    /// Whether the request that produced this error may be sent again
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Api { status, .. } => crate::retry::is_retryable_status(*status),
            GenerationError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
