//! TSX to JavaScript transpilation
//!
//! Three passes over the source text, each copying through what it does not
//! understand:
//!
//! 1. [`jsx`] lowers JSX elements to `React.createElement` calls
//! 2. [`typescript`] strips type-level syntax
//! 3. [`modules`] rewrites `import`/`export` into runtime bindings
//!
//! The result is a script body meant to run inside the preview runtime's
//! module wrapper.

mod jsx;
mod modules;
mod scanner;
mod typescript;

use crate::error::TranspileError;

/// Executable script plus what the rewrite learned about the module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOutput {
    pub code: String,
    /// Packages the component imports; they render as placeholders
    pub external_modules: Vec<String>,
}

/// Transpile TSX component source into a script for the preview runtime
pub fn transpile(source: &str) -> Result<TranspileOutput, TranspileError> {
    let lowered = jsx::lower_jsx(source)?;
    let stripped = typescript::strip_types(&lowered)?;
    let modules::ModuleOutput {
        code,
        external_modules,
    } = modules::rewrite_modules(&stripped)?;

    log::debug!(
        "Transpiled {} bytes of source into {} bytes ({} external module(s))",
        source.len(),
        code.len(),
        external_modules.len()
    );

    Ok(TranspileOutput {
        code,
        external_modules,
    })
}

/// Quote a string as a JavaScript string literal
pub(crate) fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpile_component() {
        let source = r#"import React, { useState } from 'react';
import { Star } from 'lucide-react';

interface CardProps {
  title: string;
  count?: number;
}

export default function Card({ title, count = 0 }: CardProps) {
  const [open, setOpen] = useState<boolean>(false);
  return (
    <div className="card" onClick={() => setOpen(!open)}>
      <Star size={16} />
      <h2>{title}</h2>
    </div>
  );
}
"#;
        let out = transpile(source).unwrap();

        assert!(out.code.contains("const { useState } = React;"));
        assert!(out.code.contains("React.__module(\"lucide-react\")"));
        assert!(out.code.contains("function Card({ title, count = 0 })"));
        assert!(out.code.contains("useState(false)"));
        assert!(out.code.contains("React.createElement(\"div\""));
        assert!(out.code.contains("React.createElement(Star"));
        assert!(out.code.trim_end().ends_with("exports.default = Card;"));
        assert!(!out.code.contains("interface"));
        assert_eq!(out.external_modules, vec!["lucide-react"]);
    }

    #[test]
    fn test_transpile_preserves_line_count() {
        let source = "import React from 'react';\n\ninterface P {\n  a: string;\n}\n\nconst x = 1;\n";
        let out = transpile(source).unwrap();
        assert_eq!(out.code.lines().count(), source.lines().count());
    }

    #[test]
    fn test_transpile_errors() {
        assert!(transpile("const a = <div>;").is_err());
        assert!(transpile("import { B } from './B';").is_err());
    }

    #[test]
    fn test_json_string() {
        assert_eq!(json_string("a\"b\n"), "\"a\\\"b\\n\"");
    }
}
