//! Structural Extractor
//!
//! Best-effort, pattern-based summary of a generated component. This is not a
//! parser: it looks for the handful of shapes model output usually has
//! (a `Props` interface, a destructured parameter list, `useState` hooks and
//! ES imports) and records what it finds.
//!
//! [`analyze`] never fails. Any problem inside a pass discards the partial
//! result and returns the default summary together with the error, so the
//! caller can explain it in the info panel without blocking the code or
//! preview panels.

use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::error::AnalysisError;
use crate::patterns::{patterns, Patterns};
use crate::types::{StructuralSummary, DEFAULT_COMPONENT_NAME};

/// Inputs larger than this are not analyzed
pub const MAX_SOURCE_BYTES: usize = 512 * 1024;

/// Framework root import that is never listed as a dependency
const FRAMEWORK_ROOT: &str = "React";

/// Result of [`analyze`]: always a usable summary, plus the failure if one occurred
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub summary: StructuralSummary,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_error")]
    pub error: Option<AnalysisError>,
}

fn serialize_error<S>(error: &Option<AnalysisError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(e) => serializer.serialize_str(&e.user_message()),
        None => serializer.serialize_none(),
    }
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Analyze a source blob, substituting the default summary on failure.
///
/// # Arguments
/// * `source` - Raw component source (already stripped of markdown fences)
///
/// # Returns
/// The summary and, when a pass failed, the error that caused the fallback
pub fn analyze(source: &str) -> Analysis {
    match try_analyze(source) {
        Ok(summary) => Analysis {
            summary,
            error: None,
        },
        Err(e) => {
            log::warn!("Component analysis failed, using default summary: {}", e);
            Analysis {
                summary: StructuralSummary::default(),
                error: Some(e),
            }
        }
    }
}

/// Fallible core of [`analyze`].
///
/// Panics raised inside the heuristic passes are caught and reported as
/// [`AnalysisError::Panicked`].
pub fn try_analyze(source: &str) -> Result<StructuralSummary, AnalysisError> {
    if source.len() > MAX_SOURCE_BYTES {
        return Err(AnalysisError::SourceTooLarge {
            size: source.len(),
            limit: MAX_SOURCE_BYTES,
        });
    }

    let patterns = patterns()?;

    panic::catch_unwind(AssertUnwindSafe(|| run_passes(patterns, source))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        AnalysisError::Panicked(message)
    })
}

fn run_passes(patterns: &Patterns, source: &str) -> StructuralSummary {
    let mut summary = StructuralSummary::default();

    if let Some(name) = find_component_name(patterns, source) {
        summary.name = name;
    }
    summary.props = extract_props(patterns, source);
    summary.state = extract_state(patterns, source);
    summary.dependencies = extract_dependencies(patterns, source);

    log::debug!(
        "Analyzed component '{}': {} props, {} state, {} dependencies",
        summary.name,
        summary.props.len(),
        summary.state.len(),
        summary.dependencies.len()
    );

    summary
}

/// Detect the component identifier, or the default name when none is found
pub fn detect_component_name(source: &str) -> String {
    patterns()
        .ok()
        .and_then(|p| find_component_name(p, source))
        .unwrap_or_else(|| DEFAULT_COMPONENT_NAME.to_string())
}

fn find_component_name(patterns: &Patterns, source: &str) -> Option<String> {
    patterns
        .component_name
        .captures(source)
        .map(|caps| caps[1].to_string())
}

// ─── PROPS ───────────────────────────────────────────────────────────

fn extract_props(patterns: &Patterns, source: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();

    // Only the first Props declaration counts
    if let Some(caps) = patterns.props_block.captures(source) {
        let body = caps.get(2).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
        let body = patterns.block_comment.replace_all(body, "");
        let body = patterns.line_comment.replace_all(&body, "");

        for entry in patterns.prop_entry.captures_iter(&body) {
            let type_text = entry[3].trim();
            if type_text.is_empty() {
                continue;
            }
            props.insert(entry[1].to_string(), type_text.to_string());
        }
    }

    if let Some(caps) = patterns.inline_props.captures(source) {
        for name in destructured_names(&caps[1]) {
            props.entry(name).or_insert_with(|| "any".to_string());
        }
    }

    props
}

/// Identifiers bound by a destructuring list like `a, b = 1, c: alias, ...rest`
fn destructured_names(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.starts_with("...") {
                return None;
            }
            let ident: String = part
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
                .collect();
            let starts_ok = ident
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
            starts_ok.then_some(ident)
        })
        .collect()
}

// ─── STATE ───────────────────────────────────────────────────────────

fn extract_state(patterns: &Patterns, source: &str) -> BTreeMap<String, String> {
    let mut state = BTreeMap::new();

    for caps in patterns.state_hook.captures_iter(source) {
        let label = match caps.get(2).map(|m| m.as_str().trim()) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => guess_literal_type(patterns, &caps[3]).to_string(),
        };
        // Later hooks with the same name replace earlier ones
        state.insert(caps[1].to_string(), label);
    }

    state
}

/// Static type guess for a `useState` initializer.
///
/// Only literal forms are recognized; anything else is `"any"`. The
/// expression is never evaluated.
pub fn infer_literal_type(initializer: &str) -> &'static str {
    match patterns() {
        Ok(p) => guess_literal_type(p, initializer),
        Err(_) => "any",
    }
}

fn guess_literal_type(patterns: &Patterns, initializer: &str) -> &'static str {
    let text = initializer.trim();

    if text.is_empty() || text == "undefined" {
        return "undefined";
    }
    if text == "true" || text == "false" {
        return "boolean";
    }
    if text == "null" {
        return "object";
    }
    if patterns.numeric_literal.is_match(text) {
        return "number";
    }
    if is_quoted(text) {
        return "string";
    }
    if text.starts_with('[') && text.ends_with(']') {
        return "array";
    }
    if text.starts_with('{') && text.ends_with('}') {
        return "object";
    }
    "any"
}

fn is_quoted(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if text.len() >= 2 => {
            open == close && matches!(open, '"' | '\'' | '`')
        }
        _ => false,
    }
}

// ─── DEPENDENCIES ────────────────────────────────────────────────────

fn extract_dependencies(patterns: &Patterns, source: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();
    let mut push = |item: &str| {
        if !item.is_empty() && seen.insert(item.to_string()) {
            dependencies.push(item.to_string());
        }
    };

    for caps in patterns.import.captures_iter(source) {
        let default_binding = caps.get(1).map(|m| m.as_str());
        let named = caps.get(2).map(|m| m.as_str());
        if default_binding == Some("type") && named.is_some() {
            // `import type { ... }` carries no runtime dependency
            continue;
        }

        let module = &caps[3];
        if !module.starts_with('.') && !module.starts_with('/') {
            push(module);
        }

        if let Some(named) = named {
            for specifier in named.split(',') {
                let specifier = specifier.trim();
                let specifier = specifier.strip_prefix("type ").map_or(specifier, str::trim);
                let imported = specifier.split_whitespace().next().unwrap_or("");
                if imported != FRAMEWORK_ROOT {
                    push(imported);
                }
            }
        }
    }

    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r#"
import React, { useState, useEffect } from "react";
import { Star, Heart as Love } from "lucide-react";
import clsx from 'clsx';
import { formatDate } from "./utils";

interface CardProps {
  title: string;
  // shown below the title
  subtitle?: string;
  tags: string[];
  onSelect: (id: number) => void;
}

const Card = ({ title, subtitle, tags, onSelect, extra = 3 }: CardProps) => {
  const [count, setCount] = useState(0);
  const [label, setLabel] = useState<string | null>(null);
  const [open, setOpen] = React.useState(false);
  return <div>{title}</div>;
};

export default Card;
"#;

    #[test]
    fn test_scenario_foo_props() {
        let source = "interface FooProps { label: string; count?: number; } function Foo({label, count}: FooProps) { return null; }";
        let summary = try_analyze(source).unwrap();

        assert_eq!(summary.name, "Foo");
        assert_eq!(summary.props.len(), 2);
        assert_eq!(summary.props["label"], "string");
        assert_eq!(summary.props["count"], "number");
        assert!(summary.state.is_empty());
        assert!(summary.dependencies.is_empty());
    }

    #[test]
    fn test_interface_fields_keep_trimmed_type_text() {
        let summary = try_analyze(CARD).unwrap();

        assert_eq!(summary.props["title"], "string");
        assert_eq!(summary.props["subtitle"], "string");
        assert_eq!(summary.props["tags"], "string[]");
        assert_eq!(summary.props["onSelect"], "(id: number) => void");
    }

    #[test]
    fn test_destructured_props_fill_in_any() {
        let summary = try_analyze(CARD).unwrap();

        assert_eq!(summary.props["extra"], "any");
        // Interface entries win over the destructured pass
        assert_eq!(summary.props["title"], "string");
        assert_eq!(summary.props.len(), 5);
    }

    #[test]
    fn test_only_first_props_interface_is_used() {
        let source = r#"
interface AProps { first: string; }
interface BProps { second: number; }
function A() { return null; }
"#;
        let summary = try_analyze(source).unwrap();
        assert_eq!(summary.props.len(), 1);
        assert!(summary.props.contains_key("first"));
    }

    #[test]
    fn test_type_alias_props() {
        let source = "type ButtonProps = {\n  label: string\n  disabled?: boolean\n};\nfunction Button() {}";
        let summary = try_analyze(source).unwrap();
        assert_eq!(summary.props["label"], "string");
        assert_eq!(summary.props["disabled"], "boolean");
    }

    #[test]
    fn test_state_hooks() {
        let summary = try_analyze(CARD).unwrap();

        assert_eq!(summary.state["count"], "number");
        assert_eq!(summary.state["label"], "string | null");
        assert_eq!(summary.state["open"], "boolean");
    }

    #[test]
    fn test_state_hooks_sharing_a_type_are_separate_entries() {
        let source = r#"
function Form() {
  const [first, setFirst] = useState<string>("");
  const [last, setLast] = useState<string>("");
}
"#;
        let summary = try_analyze(source).unwrap();
        assert_eq!(summary.state.len(), 2);
        assert_eq!(summary.state["first"], "string");
        assert_eq!(summary.state["last"], "string");
    }

    #[test]
    fn test_duplicate_state_name_last_wins() {
        let source = r#"
function A() { const [value, setValue] = useState(1); }
function B() { const [value, setValue] = useState("x"); }
"#;
        let summary = try_analyze(source).unwrap();
        assert_eq!(summary.state.len(), 1);
        assert_eq!(summary.state["value"], "string");
    }

    #[test]
    fn test_non_literal_initializer_is_any() {
        let source = "function A() { const [items, setItems] = useState(loadItems()); }";
        let summary = try_analyze(source).unwrap();
        assert_eq!(summary.state["items"], "any");
    }

    #[test]
    fn test_literal_guesses() {
        assert_eq!(infer_literal_type("42"), "number");
        assert_eq!(infer_literal_type("-3.5"), "number");
        assert_eq!(infer_literal_type("0xff"), "number");
        assert_eq!(infer_literal_type("'hi'"), "string");
        assert_eq!(infer_literal_type("`t`"), "string");
        assert_eq!(infer_literal_type("true"), "boolean");
        assert_eq!(infer_literal_type("[]"), "array");
        assert_eq!(infer_literal_type("{}"), "object");
        assert_eq!(infer_literal_type("null"), "object");
        assert_eq!(infer_literal_type(""), "undefined");
        assert_eq!(infer_literal_type("a + b"), "any");
        assert_eq!(infer_literal_type("'"), "any");
    }

    #[test]
    fn test_dependencies() {
        let summary = try_analyze(CARD).unwrap();
        assert_eq!(
            summary.dependencies,
            vec![
                "react",
                "useState",
                "useEffect",
                "lucide-react",
                "Star",
                "Heart",
                "clsx",
                "formatDate",
            ]
        );
    }

    #[test]
    fn test_no_imports_means_no_dependencies() {
        let summary = try_analyze("export default function Plain() { return null; }").unwrap();
        assert!(summary.dependencies.is_empty());
    }

    #[test]
    fn test_type_only_imports_are_skipped() {
        let summary = try_analyze(r#"import type { FC } from "react"; function A() {}"#).unwrap();
        assert!(summary.dependencies.is_empty());
    }

    #[test]
    fn test_default_name_when_undetected() {
        let summary = try_analyze("const x = 1;").unwrap();
        assert_eq!(summary.name, DEFAULT_COMPONENT_NAME);
        assert_eq!(detect_component_name("let y = 2;"), DEFAULT_COMPONENT_NAME);
    }

    #[test]
    fn test_oversized_source_falls_back_to_default() {
        let source = "a".repeat(MAX_SOURCE_BYTES + 1);
        let analysis = analyze(&source);

        assert!(!analysis.is_ok());
        assert_eq!(analysis.summary, StructuralSummary::default());
        assert!(matches!(
            analysis.error,
            Some(AnalysisError::SourceTooLarge { .. })
        ));
    }

    #[test]
    fn test_analysis_serializes_error_message() {
        let ok = serde_json::to_value(analyze("function A() {}")).unwrap();
        assert!(ok.get("error").is_none());
        assert_eq!(ok["summary"]["name"], "A");

        let failed = serde_json::to_value(analyze(&"x".repeat(MAX_SOURCE_BYTES + 1))).unwrap();
        assert!(failed["error"]
            .as_str()
            .unwrap()
            .starts_with("Could not analyze component structure"));
    }
}
