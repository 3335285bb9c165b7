//! Compiled extraction patterns
//!
//! All heuristics in this crate are regex-driven. The set is compiled once on
//! first use; a compilation failure is kept and surfaced as
//! [`AnalysisError::Pattern`] instead of aborting the process.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AnalysisError;

pub(crate) struct Patterns {
    /// `function|class|const Name`
    pub component_name: Regex,
    /// `function|class Name` (used for download file names)
    pub declaration_name: Regex,
    /// `interface XProps { ... }` or `type XProps = { ... }`
    pub props_block: Regex,
    /// `name[?]: type;` inside a props body
    pub prop_entry: Regex,
    pub block_comment: Regex,
    pub line_comment: Regex,
    /// `function Name({ a, b }: XProps` or `const Name = ({ a, b }: XProps`
    pub inline_props: Regex,
    /// `const [x, setX] = useState<T>(init)`
    pub state_hook: Regex,
    /// `import D, { a, b } from "m"` / `import * as N from "m"`
    pub import: Regex,
    /// Fenced code block with an optional language tag
    pub code_block: Regex,
    /// Numeric literal accepted by the state-type guess
    pub numeric_literal: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            component_name: Regex::new(r"\b(?:function|class|const)\s+([A-Z][a-zA-Z0-9]*)")?,
            declaration_name: Regex::new(r"\b(?:function|class)\s+([A-Z][a-zA-Z0-9]*)")?,
            props_block: Regex::new(
                r"\binterface\s+(\w+Props)\s*(?:extends[^{]*)?\{([^}]*)\}|\btype\s+(\w+Props)\s*=\s*\{([^}]*)\}",
            )?,
            prop_entry: Regex::new(r"(?m)([A-Za-z_$][\w$]*)(\??)\s*:\s*([^;\n]+)(?:;|$)")?,
            block_comment: Regex::new(r"(?s)/\*.*?\*/")?,
            line_comment: Regex::new(r"//[^\n]*")?,
            inline_props: Regex::new(
                r"(?:\bfunction\s+\w+\s*|\bconst\s+\w+\s*=\s*)\(\s*\{([^}]+)\}\s*:\s*\w+Props\b",
            )?,
            state_hook: Regex::new(
                r"\bconst\s+\[\s*([A-Za-z_$][\w$]*)\s*,\s*set[\w$]+\s*\]\s*=\s*(?:React\.)?useState(?:<(.+?)>)?\s*\(([^)]*)\)",
            )?,
            import: Regex::new(
                r#"\bimport\s+(?:([A-Za-z_$][\w$]*)\s*(?:,\s*)?)?(?:\{([^}]*)\}|\*\s*as\s+[A-Za-z_$][\w$]*)?\s*from\s*['"]([^'"]+)['"]"#,
            )?,
            code_block: Regex::new(
                r"```(?:jsx?|tsx?|javascript|typescript)?[ \t]*\r?\n((?s:.*?))```",
            )?,
            numeric_literal: Regex::new(
                r"^[+-]?(?:\d[\d_]*(?:\.\d*)?(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?|0[xXoObB][0-9a-fA-F_]+|NaN|Infinity)$",
            )?,
        })
    }
}

static PATTERNS: Lazy<Result<Patterns, regex::Error>> = Lazy::new(Patterns::compile);

/// Access the shared pattern set
pub(crate) fn patterns() -> Result<&'static Patterns, AnalysisError> {
    PATTERNS.as_ref().map_err(|e| AnalysisError::Pattern(e.clone()))
}
