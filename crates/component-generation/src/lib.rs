//! UI component generation
//!
//! Builds prompts from a component description, streams the answer from a
//! [`GenerationBackend`] and cleans it into component source. When no
//! backend is configured, or generation fails, a deterministic fallback
//! component is produced instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use component_generation::{ComponentGenerator, GenerationConfig, GenerationRequest};
//!
//! let generator = ComponentGenerator::from_config(GenerationConfig::default())?;
//! let request = GenerationRequest::new("a pricing card with three tiers");
//! request.validate()?;
//! let generated = generator.generate(&request).await;
//! ```

pub mod backend;
pub mod clean;
pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod request;
pub mod retry;

// Re-exports for convenience
pub use backend::{ChatRequest, CohereBackend, GenerationBackend, TextStream};
pub use clean::clean_generated_code;
pub use config::GenerationConfig;
pub use error::{GenerationError, ValidationIssue};
pub use fallback::{fallback_component, fallback_component_name};
pub use generator::{ComponentGenerator, GeneratedCode};
pub use prompt::{chat_prompt, enhanced_prompt, PREAMBLE};
pub use request::GenerationRequest;
pub use retry::RetryPolicy;
