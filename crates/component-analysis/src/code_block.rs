//! Code-block extraction for model output

use crate::patterns::patterns;

/// Return the contents of the first fenced code block, trimmed.
///
/// The fence may carry a `jsx`, `tsx`, `js`, `ts`, `javascript` or
/// `typescript` tag. Text without a fence is returned unchanged.
pub fn extract_code_block(text: &str) -> String {
    let Ok(patterns) = patterns() else {
        return text.to_string();
    };

    match patterns.code_block.captures(text) {
        Some(caps) => caps[1].trim().to_string(),
        None => text.to_string(),
    }
}
