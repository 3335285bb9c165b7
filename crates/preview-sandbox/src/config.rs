//! Sandbox limits

use serde::{Deserialize, Serialize};

/// Limits applied to every preview run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Wall-clock budget for one preview, in milliseconds
    pub timeout_ms: u64,
    /// Maximum iterations of any single loop
    pub loop_iteration_limit: u64,
    /// Maximum call depth
    pub recursion_limit: usize,
    /// Render passes allowed before reporting an update loop
    pub max_render_passes: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            loop_iteration_limit: 1_000_000,
            recursion_limit: 512,
            max_render_passes: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SandboxConfig = serde_json::from_str(r#"{"timeout_ms": 100}"#).unwrap();
        assert_eq!(config.timeout_ms, 100);
        assert_eq!(config.max_render_passes, 25);
        assert_eq!(config.loop_iteration_limit, 1_000_000);
    }
}
