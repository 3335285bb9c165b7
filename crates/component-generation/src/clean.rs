//! Post-processing of raw model output

use once_cell::sync::Lazy;
use regex::Regex;

const REACT_IMPORT: &str = "import React from \"react\";\n";

/// Opening fence with an optional language tag, or a bare closing fence
/// followed by a newline
static FENCE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"```(?:jsx|tsx|javascript|typescript)?\n"));

/// Turn raw model output into component source.
///
/// Every fence line is removed along with a trailing fence, React is
/// imported when the text does not import it, and the result is trimmed.
pub fn clean_generated_code(raw: &str) -> String {
    let unfenced = match FENCE.as_ref() {
        Ok(fence) => fence.replace_all(raw, "").into_owned(),
        Err(e) => {
            log::warn!("Fence pattern unavailable: {}", e);
            raw.to_string()
        }
    };

    let mut code = unfenced.trim_end();
    if let Some(stripped) = code.strip_suffix("```") {
        code = stripped;
    }

    if code.contains("import React") {
        code.trim().to_string()
    } else {
        format!("{}{}", REACT_IMPORT, code).trim().to_string()
    }
}
