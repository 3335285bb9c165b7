//! Deterministic component used when generation is unavailable

use component_analysis::DEFAULT_COMPONENT_NAME;

/// PascalCase identifier derived from a description.
///
/// Each space-separated word is capitalized, the rest of the word lowered,
/// and anything outside `[A-Za-z0-9]` dropped. An empty result falls back
/// to the default component name; a leading digit gets a `Component` prefix.
pub fn fallback_component_name(description: &str) -> String {
    let name: String = description
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<String>()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    match name.chars().next() {
        None => DEFAULT_COMPONENT_NAME.to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{}", name),
        Some(_) => name,
    }
}

/// Escape text for use as a JSX text child
fn jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Source of the fallback component for `description`
pub fn fallback_component(description: &str) -> String {
    let name = fallback_component_name(description);
    let described = jsx_text(description);

    format!(
        r#"import React from "react";

interface {name}Props {{
  title?: string;
  description?: string;
  theme?: "light" | "dark";
}}

export default function {name}({{ 
  title = "Component Title", 
  description = "This is a description of the component.", 
  theme = "light" 
}}: {name}Props) {{
  return (
    <div className={{`p-6 rounded-lg shadow-md ${{theme === "dark" ? "bg-gray-800 text-white" : "bg-white text-gray-800"}}`}}>
      <h2 className="text-xl font-bold mb-2">{{title}}</h2>
      <p className="text-sm opacity-80">{{description}}</p>
      <div className="mt-4">
        <p className="text-xs opacity-60">This is a fallback component generated based on: "{described}"</p>
      </div>
    </div>
  );
}}"#
    )
}
