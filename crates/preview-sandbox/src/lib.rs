//! Runtime preview of generated UI components
//!
//! Components arrive as TSX text. This crate transpiles them to plain
//! JavaScript, runs them in a fresh boa_engine context against a small
//! React-compatible runtime, and serializes the rendered tree to HTML for
//! the preview area.
//!
//! Every failure is contained: the mount point shows a [`PreviewFailure`]
//! instead of a preview, and the next render starts from a clean context.
//!
//! # Example
//!
//! ```rust,ignore
//! use component_analysis::{analyze, MockPropertySet};
//! use preview_sandbox::{MountPoint, PreviewRenderer};
//!
//! let summary = analyze(&source).summary;
//! let props = MockPropertySet::from_summary(&summary);
//! let mut mount = MountPoint::new();
//! PreviewRenderer::default().render(&source, &props, &mut mount);
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod mount;
pub mod props;
pub mod renderer;
mod runtime;
pub mod sandbox;
pub mod transpile;

// Re-exports for convenience
pub use boundary::FaultBoundary;
pub use config::SandboxConfig;
pub use error::{FailureKind, Location, PreviewFailure, SandboxError, TranspileError};
pub use mount::{
    ConsoleEntry, ConsoleLevel, ExportSlot, MountPoint, PreviewDisplay, RenderedPreviewHandle,
};
pub use renderer::{PreviewPanel, PreviewRenderer};
pub use sandbox::{Sandbox, SandboxOutput};
pub use transpile::{transpile, TranspileOutput};
