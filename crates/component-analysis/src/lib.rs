//! Structural analysis of generated UI component source
//!
//! This crate holds everything that looks at generated component text without
//! executing it:
//! - **Structural Extractor**: best-effort summary of name, props, state and imports
//! - **Mock properties**: deterministic sample values for previewing a component
//! - **Code-block extraction**: strips fenced markdown around model output
//! - **File splitting / export**: `// File:` markers, download names, ZIP archives
//!
//! # Example
//!
//! ```rust,ignore
//! use component_analysis::{analyze, MockPropertySet};
//!
//! let analysis = analyze(source);
//! let mock_props = MockPropertySet::from_summary(&analysis.summary);
//! ```

pub mod code_block;
pub mod error;
pub mod export;
pub mod extractor;
pub mod files;
pub mod mock_props;
mod patterns;
pub mod types;

// Re-exports for convenience
pub use code_block::extract_code_block;
pub use error::{AnalysisError, ExportError};
pub use export::{
    archive_or_concatenate, concatenate_files, format_file_size, single_file_download,
    suggested_filename, zip_archive, Download,
};
pub use extractor::{analyze, detect_component_name, infer_literal_type, try_analyze, Analysis};
pub use files::{split_files, SourceFile, FILE_MARKER};
pub use mock_props::{mock_value_for, MockPropertySet, MockValue};
pub use types::{StructuralSummary, DEFAULT_COMPONENT_NAME, DEFAULT_DESCRIPTION};
