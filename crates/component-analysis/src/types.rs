//! Common types for component analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name used when no component identifier can be detected
pub const DEFAULT_COMPONENT_NAME: &str = "GeneratedComponent";

/// Description shown when nothing better is known about the component
pub const DEFAULT_DESCRIPTION: &str = "React component generated with Cohere API.";

/// Best-effort structural summary of a generated component.
///
/// Derived data only: recomputed from scratch for every new source text and
/// never merged with a previous summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSummary {
    /// Component identifier
    pub name: String,
    /// Prop name -> coarse type label (verbatim type text or "any")
    pub props: BTreeMap<String, String>,
    /// State variable -> inferred type label
    pub state: BTreeMap<String, String>,
    /// External modules and named imports, deduplicated in first-seen order
    pub dependencies: Vec<String>,
    /// Free-text summary
    pub description: String,
}

impl Default for StructuralSummary {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPONENT_NAME.to_string(),
            props: BTreeMap::new(),
            state: BTreeMap::new(),
            dependencies: Vec::new(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}
