//! Splitting generated output into named files
//!
//! Models asked for several files separate them with `// File: <path>` lines.
//! Everything after a marker, up to the next marker or the end of the text,
//! is that file's content.

use serde::{Deserialize, Serialize};

use crate::extractor::detect_component_name;

/// Marker that starts a new file in generated output
pub const FILE_MARKER: &str = "// File:";

/// Directory used for the implicit file when no marker is present
const IMPLICIT_DIR: &str = "src/components";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Split generated text on `// File:` markers.
///
/// Without any valid marker the whole text becomes one file named after the
/// detected component, e.g. `src/components/Card.tsx`.
pub fn split_files(code: &str) -> Vec<SourceFile> {
    let files = marked_files(code);
    if files.is_empty() {
        let name = format!("{}/{}.tsx", IMPLICIT_DIR, detect_component_name(code));
        return vec![SourceFile::new(name, code)];
    }
    log::debug!("Split generated code into {} file(s)", files.len());
    files
}

fn marked_files(code: &str) -> Vec<SourceFile> {
    let starts: Vec<usize> = code.match_indices(FILE_MARKER).map(|(i, _)| i).collect();
    let mut files = Vec::with_capacity(starts.len());

    for (index, &start) in starts.iter().enumerate() {
        let end = starts.get(index + 1).copied().unwrap_or(code.len());
        let section = &code[start + FILE_MARKER.len()..end];

        // The name is the rest of the marker line; a marker without a body is ignored
        let Some((name, content)) = section.split_once('\n') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        files.push(SourceFile::new(name, content.trim()));
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_yields_single_file() {
        let code = "export default function Card() {\n  return <div />;\n}\n";
        let files = split_files(code);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, code);
        assert_eq!(files[0].name, "src/components/Card.tsx");
    }

    #[test]
    fn test_no_marker_without_component_uses_default_name() {
        let files = split_files("const x = 1;");
        assert_eq!(files[0].name, "src/components/GeneratedComponent.tsx");
    }

    #[test]
    fn test_two_markers_partition_content() {
        let code = "// File: a.tsx\nexport const A = 1;\n\n// File: b.tsx\nexport const B = 2;\n";
        let files = split_files(code);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], SourceFile::new("a.tsx", "export const A = 1;"));
        assert_eq!(files[1], SourceFile::new("b.tsx", "export const B = 2;"));
    }

    #[test]
    fn test_text_before_first_marker_is_dropped() {
        let code = "Intro text\n// File: only.ts\nbody";
        let files = split_files(code);
        assert_eq!(files, vec![SourceFile::new("only.ts", "body")]);
    }

    #[test]
    fn test_only_invalid_markers_yield_single_file() {
        let code = "// File:\nexport default function Card() { return null; }\n// File: dangling";
        let files = split_files(code);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "src/components/Card.tsx");
        assert_eq!(files[0].content, code);
    }

    #[test]
    fn test_marker_without_newline_is_ignored() {
        let files = split_files("// File: a.tsx\nA\n// File: dangling");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.tsx");
    }
}
