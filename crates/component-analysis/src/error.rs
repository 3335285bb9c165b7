//! Error types for component analysis and export

use thiserror::Error;

/// Errors raised by the structural extractor.
///
/// These never escape [`crate::analyze`]; they are reported next to the
/// default summary so the caller can show them in the info panel.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Source text exceeds the analysis size limit
    #[error("Source is too large to analyze ({size} bytes, limit {limit})")]
    SourceTooLarge { size: usize, limit: usize },

    /// One of the extraction patterns failed to compile
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A heuristic pass panicked
    #[error("Analysis pass failed: {0}")]
    Panicked(String),
}

impl AnalysisError {
    /// Message shown in the info panel when analysis fails
    pub fn user_message(&self) -> String {
        format!(
            "Could not analyze component structure. The component might be complex or have syntax issues. ({})",
            self
        )
    }
}

/// Errors raised while building export artifacts
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}
