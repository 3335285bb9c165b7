//! Dynamic Preview Renderer
//!
//! [`PreviewRenderer`] turns component source plus mock props into whatever
//! the mount point shows. [`PreviewPanel`] adds the panel behaviour on top:
//! it re-renders only when its inputs change.

use component_analysis::MockPropertySet;
use uuid::Uuid;

use crate::config::SandboxConfig;
use crate::mount::{MountPoint, RenderedPreviewHandle};
use crate::sandbox::Sandbox;

#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer {
    sandbox: Sandbox,
}

impl PreviewRenderer {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            sandbox: Sandbox::new(config),
        }
    }

    /// Render `source` into `mount`.
    ///
    /// The previous handle is always torn down first. Afterwards the mount
    /// point shows either the new handle or a failure; nothing is returned.
    pub fn render(&self, source: &str, props: &MockPropertySet, mount: &mut MountPoint) {
        mount.teardown();

        match self.sandbox.run(source, props) {
            Ok(output) => mount.mount(RenderedPreviewHandle {
                id: Uuid::new_v4(),
                markup: output.markup,
                export_name: output.export_name,
                export_slot: output.export_slot,
                render_passes: output.render_passes,
                console: output.console,
                placeholders: output.placeholders,
                external_modules: output.external_modules,
            }),
            Err(failure) => mount.fail(failure),
        }
    }
}

/// Preview area that tracks its last inputs
#[derive(Debug, Default)]
pub struct PreviewPanel {
    renderer: PreviewRenderer,
    mount: MountPoint,
    last_inputs: Option<(String, MockPropertySet)>,
}

impl PreviewPanel {
    pub fn new(renderer: PreviewRenderer) -> Self {
        Self {
            renderer,
            mount: MountPoint::new(),
            last_inputs: None,
        }
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.mount
    }

    /// Render if `(source, props)` differs from the last render.
    /// Returns whether a render happened.
    pub fn update(&mut self, source: &str, props: &MockPropertySet) -> bool {
        let unchanged = self
            .last_inputs
            .as_ref()
            .is_some_and(|(s, p)| s == source && p == props);
        if unchanged {
            return false;
        }

        self.last_inputs = Some((source.to_string(), props.clone()));
        self.renderer.render(source, props, &mut self.mount);
        true
    }

    /// Render the last inputs again, even if unchanged
    pub fn refresh(&mut self) -> bool {
        let Some((source, props)) = self.last_inputs.clone() else {
            return false;
        };
        self.renderer.render(&source, &props, &mut self.mount);
        true
    }

    /// Tear down the preview and forget the last inputs
    pub fn unmount(&mut self) {
        self.mount.teardown();
        self.last_inputs = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::mount::PreviewDisplay;

    const COUNTER: &str = r#"
import React, { useState, useEffect } from 'react';

export default function Counter({ start }: { start: number }) {
  const [count, setCount] = useState(0);
  useEffect(() => {
    setCount(start);
  }, [start]);
  return <button className="counter">Count: {count}</button>;
}
"#;

    fn props(start: i64) -> MockPropertySet {
        [("start".to_string(), component_analysis::MockValue::Number(start))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_invalid_source_mounts_nothing() {
        let mut mount = MountPoint::new();
        PreviewRenderer::default().render("export default () => <div", &MockPropertySet::new(), &mut mount);

        assert_eq!(mount.live_instances(), 0);
        assert_eq!(mount.failure().unwrap().kind, FailureKind::Compile);
    }

    #[test]
    fn test_effect_state_update() {
        let mut mount = MountPoint::new();
        PreviewRenderer::default().render(COUNTER, &props(7), &mut mount);

        let handle = mount.handle().unwrap();
        assert_eq!(handle.markup, r#"<button class="counter">Count: 7</button>"#);
        assert_eq!(handle.render_passes, 2);
    }

    #[test]
    fn test_rendering_twice_replaces_handle() {
        let renderer = PreviewRenderer::default();
        let mut mount = MountPoint::new();

        renderer.render(COUNTER, &props(1), &mut mount);
        let first = mount.handle().unwrap().clone();
        renderer.render(COUNTER, &props(1), &mut mount);
        let second = mount.handle().unwrap().clone();

        assert_eq!(first.markup, second.markup);
        assert_ne!(first.id, second.id);
        assert_eq!(mount.live_instances(), 1);
        assert_eq!(mount.mount_count(), 2);
        assert_eq!(mount.teardown_count(), 1);
    }

    #[test]
    fn test_panel_recovers_after_render_error() {
        let mut panel = PreviewPanel::default();

        let broken = "export default function Broken() { const x: any = null; return <p>{x.name}</p>; }";
        assert!(panel.update(broken, &MockPropertySet::new()));
        match panel.mount_point().display() {
            PreviewDisplay::Failed { failure } => {
                assert_eq!(failure.kind, FailureKind::Render);
                assert!(failure.message.contains("TypeError"));
            }
            other => panic!("expected failure, got {:?}", other),
        }

        assert!(panel.update(COUNTER, &props(2)));
        assert!(matches!(panel.mount_point().display(), PreviewDisplay::Mounted { .. }));
    }

    #[test]
    fn test_panel_skips_unchanged_inputs() {
        let mut panel = PreviewPanel::default();

        assert!(panel.update(COUNTER, &props(3)));
        assert!(!panel.update(COUNTER, &props(3)));
        assert!(panel.update(COUNTER, &props(4)));
        assert!(panel.refresh());
        assert_eq!(panel.mount_point().mount_count(), 3);

        panel.unmount();
        assert_eq!(panel.mount_point().live_instances(), 0);
        assert!(!panel.refresh());
    }

    #[test]
    fn test_fallback_component_renders() {
        let mut mount = MountPoint::new();
        let source = component_analysis::DEFAULT_COMPONENT_NAME;
        let code = format!(
            "export default function {}() {{ return <div className=\"p-4\"><h2>Component</h2></div>; }}",
            source
        );
        PreviewRenderer::default().render(&code, &MockPropertySet::new(), &mut mount);
        assert_eq!(
            mount.handle().unwrap().markup,
            r#"<div class="p-4"><h2>Component</h2></div>"#
        );
    }

    #[test]
    fn test_placeholder_imports_render() {
        let source = r#"
import { Star } from 'lucide-react';
export default function Rating() {
  return <div><Star className="icon" /> 5</div>;
}
"#;
        let mut mount = MountPoint::new();
        PreviewRenderer::default().render(source, &MockPropertySet::new(), &mut mount);

        let handle = mount.handle().unwrap();
        assert_eq!(handle.markup, r#"<div><span data-placeholder="Star"></span> 5</div>"#);
        assert_eq!(handle.external_modules, vec!["lucide-react"]);
    }
}
