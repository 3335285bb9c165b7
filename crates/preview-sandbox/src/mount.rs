//! Mount point for rendered previews
//!
//! A [`MountPoint`] owns at most one [`RenderedPreviewHandle`]. Mounting a
//! new handle or recording a failure always tears the previous one down
//! first, so handles never accumulate across renders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PreviewFailure;

/// Which export the preview rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSlot {
    /// `export default`
    Default,
    /// The only named export
    Sole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleLevel {
    Log,
    Info,
    Debug,
    Warn,
    Error,
}

/// One captured `console` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub message: String,
}

/// The mounted view of one successful render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPreviewHandle {
    pub id: Uuid,
    /// Serialized HTML of the rendered tree
    pub markup: String,
    pub export_name: String,
    pub export_slot: ExportSlot,
    pub render_passes: u32,
    pub console: Vec<ConsoleEntry>,
    /// Labels of placeholder components that were rendered
    pub placeholders: Vec<String>,
    /// Packages the source imported
    pub external_modules: Vec<String>,
}

/// What the preview area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewDisplay {
    Empty,
    Mounted { handle: RenderedPreviewHandle },
    Failed { failure: PreviewFailure },
}

#[derive(Debug, Default)]
pub struct MountPoint {
    handle: Option<RenderedPreviewHandle>,
    failure: Option<PreviewFailure>,
    mounts: u64,
    teardowns: u64,
}

impl MountPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> PreviewDisplay {
        if let Some(handle) = &self.handle {
            PreviewDisplay::Mounted {
                handle: handle.clone(),
            }
        } else if let Some(failure) = &self.failure {
            PreviewDisplay::Failed {
                failure: failure.clone(),
            }
        } else {
            PreviewDisplay::Empty
        }
    }

    pub fn handle(&self) -> Option<&RenderedPreviewHandle> {
        self.handle.as_ref()
    }

    pub fn failure(&self) -> Option<&PreviewFailure> {
        self.failure.as_ref()
    }

    /// Number of handles currently alive (0 or 1)
    pub fn live_instances(&self) -> usize {
        usize::from(self.handle.is_some())
    }

    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    pub fn teardown_count(&self) -> u64 {
        self.teardowns
    }

    /// Destroy the current handle and clear any failure. Safe to call
    /// repeatedly.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("Tearing down preview {}", handle.id);
            self.teardowns += 1;
        }
        self.failure = None;
    }

    pub fn mount(&mut self, handle: RenderedPreviewHandle) {
        self.teardown();
        log::debug!(
            "Mounted preview {} ({} after {} pass(es))",
            handle.id,
            handle.export_name,
            handle.render_passes
        );
        self.mounts += 1;
        self.handle = Some(handle);
    }

    pub fn fail(&mut self, failure: PreviewFailure) {
        self.teardown();
        log::info!("Preview failed: {}", failure);
        self.failure = Some(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn handle(markup: &str) -> RenderedPreviewHandle {
        RenderedPreviewHandle {
            id: Uuid::new_v4(),
            markup: markup.to_string(),
            export_name: "Card".to_string(),
            export_slot: ExportSlot::Default,
            render_passes: 1,
            console: Vec::new(),
            placeholders: Vec::new(),
            external_modules: Vec::new(),
        }
    }

    #[test]
    fn test_mount_replaces_previous_handle() {
        let mut mount = MountPoint::new();
        mount.mount(handle("<p>a</p>"));
        mount.mount(handle("<p>b</p>"));

        assert_eq!(mount.live_instances(), 1);
        assert_eq!(mount.mount_count(), 2);
        assert_eq!(mount.teardown_count(), 1);
        assert_eq!(mount.handle().unwrap().markup, "<p>b</p>");
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut mount = MountPoint::new();
        mount.mount(handle("<p/>"));
        mount.teardown();
        mount.teardown();

        assert_eq!(mount.live_instances(), 0);
        assert_eq!(mount.teardown_count(), 1);
        assert_eq!(mount.display(), PreviewDisplay::Empty);
    }

    #[test]
    fn test_failure_unmounts() {
        let mut mount = MountPoint::new();
        mount.mount(handle("<p/>"));
        mount.fail(PreviewFailure::new(FailureKind::Render, "boom"));

        assert_eq!(mount.live_instances(), 0);
        assert!(matches!(mount.display(), PreviewDisplay::Failed { .. }));
    }

    #[test]
    fn test_display_serialization() {
        let json = serde_json::to_value(PreviewDisplay::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }
}
