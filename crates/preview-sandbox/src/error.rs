//! Error types for the preview sandbox
//!
//! Two layers: [`TranspileError`] and [`SandboxError`] are ordinary Rust
//! errors raised while preparing and driving the engine. Everything that
//! reaches a mount point is flattened into a [`PreviewFailure`], which is
//! plain data the UI can display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source position, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised while turning TSX source into executable JavaScript
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    #[error("Unterminated {what} starting at {at}")]
    Unterminated { what: &'static str, at: Location },

    #[error("JSX syntax error at {at}: {message}")]
    Jsx { message: String, at: Location },

    #[error("Expected closing tag </{expected}> but found </{found}> at {at}")]
    MismatchedTag {
        expected: String,
        found: String,
        at: Location,
    },

    #[error("Syntax error at {at}: {message}")]
    Syntax { message: String, at: Location },

    #[error("Unsupported import of '{module}': only package imports can be previewed")]
    UnsupportedImport { module: String },

    #[error("Unsupported export at {at}: {message}")]
    UnsupportedExport { message: String, at: Location },
}

/// Errors raised while driving the JavaScript engine
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error(transparent)]
    Transpile(#[from] TranspileError),

    #[error("{0}")]
    Engine(String),

    #[error("Unexpected reply from preview runtime: {0}")]
    Protocol(#[from] serde_json::Error),
}

/// Where a preview attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Source could not be transpiled or parsed
    Compile,
    /// Module evaluated but exported nothing renderable
    MissingExport,
    /// Module body threw while evaluating
    Execution,
    /// Component threw while rendering
    Render,
    /// Effect, lifecycle method or update loop failed
    Lifecycle,
    /// Preview did not finish within the configured time
    Timeout,
    /// Failure inside the sandbox itself
    Internal,
}

impl FailureKind {
    pub fn title(&self) -> &'static str {
        match self {
            FailureKind::Compile => "Compilation error",
            FailureKind::MissingExport => "No component exported",
            FailureKind::Execution => "Error while loading component",
            FailureKind::Render => "Error while rendering component",
            FailureKind::Lifecycle => "Error in component lifecycle",
            FailureKind::Timeout => "Preview timed out",
            FailureKind::Internal => "Preview failed",
        }
    }
}

/// Recoverable failure shown in place of the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}: {}", .kind.title(), .message)]
pub struct PreviewFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl PreviewFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn compile(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Compile, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Internal, message)
    }
}

impl From<TranspileError> for PreviewFailure {
    fn from(e: TranspileError) -> Self {
        PreviewFailure::compile(e.to_string())
    }
}
