//! Component generation with graceful fallback
//!
//! [`ComponentGenerator`] never fails a one-shot generation: a missing
//! backend, a provider error or an empty answer all produce the
//! deterministic fallback component instead.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Serialize;

use crate::backend::{ChatRequest, CohereBackend, GenerationBackend, TextStream};
use crate::clean::clean_generated_code;
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::fallback::fallback_component;
use crate::prompt::{chat_prompt, enhanced_prompt, PREAMBLE};
use crate::request::GenerationRequest;
use crate::retry::RetryPolicy;

/// Result of a one-shot generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    pub code: String,
    /// Whether `code` is the fallback component
    pub fallback: bool,
}

#[derive(Clone)]
pub struct ComponentGenerator {
    backend: Option<Arc<dyn GenerationBackend>>,
    config: GenerationConfig,
}

impl ComponentGenerator {
    pub fn new(backend: Option<Arc<dyn GenerationBackend>>, config: GenerationConfig) -> Self {
        Self { backend, config }
    }

    /// Build a generator with a Cohere backend when an API key is configured
    pub fn from_config(config: GenerationConfig) -> Result<Self, GenerationError> {
        let backend: Option<Arc<dyn GenerationBackend>> = match config.api_key() {
            Some(key) => Some(Arc::new(CohereBackend::new(
                key,
                config.base_url.clone(),
                Duration::from_secs(config.timeout_secs),
                RetryPolicy::with_max_retries(config.max_retries),
            )?)),
            None => {
                log::warn!("Cohere API key not found. Using fallback mode.");
                None
            }
        };
        Ok(Self::new(backend, config))
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate a component for an already validated request.
    ///
    /// Fragments are streamed, concatenated and cleaned. Any failure yields
    /// the fallback component for the prompt.
    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedCode {
        let Some(backend) = &self.backend else {
            log::warn!("No generation backend configured, using fallback component");
            return Self::fallback(&request.prompt);
        };

        let chat = ChatRequest {
            message: enhanced_prompt(&request.prompt),
            model: request.model.clone().unwrap_or_else(|| self.config.model.clone()),
            preamble: Some(PREAMBLE.to_string()),
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: None,
        };

        match collect_text(backend.as_ref(), &chat).await {
            Ok(raw) if !raw.trim().is_empty() => {
                log::info!("Generated {} bytes with {}", raw.len(), backend.name());
                GeneratedCode {
                    code: clean_generated_code(&raw),
                    fallback: false,
                }
            }
            Ok(_) => {
                log::warn!("{} returned no text, using fallback component", backend.name());
                Self::fallback(&request.prompt)
            }
            Err(e) => {
                log::warn!("Generation with {} failed: {}. Using fallback component.", backend.name(), e);
                Self::fallback(&request.prompt)
            }
        }
    }

    /// Stream a chat answer for `content`.
    ///
    /// Unlike [`Self::generate`] this does not fall back; the caller decides
    /// how to report the error.
    pub async fn chat_stream(&self, content: &str) -> Result<TextStream, GenerationError> {
        let backend = self.backend.as_ref().ok_or(GenerationError::NotConfigured)?;
        let chat = ChatRequest {
            message: chat_prompt(content),
            model: self.config.chat_model.clone(),
            preamble: None,
            temperature: self.config.temperature,
            max_tokens: Some(self.config.chat_max_tokens),
        };
        backend.stream(&chat).await
    }

    fn fallback(prompt: &str) -> GeneratedCode {
        GeneratedCode {
            code: fallback_component(prompt),
            fallback: true,
        }
    }
}

async fn collect_text(backend: &dyn GenerationBackend, request: &ChatRequest) -> Result<String, GenerationError> {
    let mut stream = backend.stream(request).await?;
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(text)
}
