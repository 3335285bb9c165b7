//! Generation backend abstraction
//!
//! A backend turns a [`ChatRequest`] into a stream of text fragments.
//! [`CohereBackend`] talks to the Cohere chat API; tests use their own
//! implementations.

mod cohere;

pub use cohere::CohereBackend;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use serde::Serialize;

use crate::error::GenerationError;

/// Stream of generated text fragments
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// Provider-neutral chat request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Trait for text generation providers
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Generate the response as a stream of text fragments
    async fn stream(&self, request: &ChatRequest) -> Result<TextStream, GenerationError>;
}
