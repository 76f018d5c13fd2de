//! Validate, prettify and minify JSON.
//!
//! Object key order is kept as written (`serde_json` with `preserve_order`).

use super::normalize_text;
use crate::error::{ClickozError, ClickozResult};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indentation.
    Pretty,
    Minified,
}

/// Size of a formatted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStats {
    pub lines: usize,
    pub chars: usize,
    pub bytes: usize,
}

impl JsonStats {
    pub fn of(text: &str) -> Self {
        Self {
            lines: if text.is_empty() {
                0
            } else {
                text.split('\n').count()
            },
            chars: text.chars().count(),
            bytes: text.len(),
        }
    }
}

/// Parse `text`, reporting the 1-based line and column of the first error.
pub fn validate_json(text: &str) -> ClickozResult<Value> {
    let t = normalize_text(text);
    let raw = t.trim();
    if raw.is_empty() {
        return Err(ClickozError::EmptyInput {
            tool: "json-formatter",
        });
    }
    serde_json::from_str(raw).map_err(|e| ClickozError::InvalidJson {
        line: e.line(),
        column: e.column(),
        message: describe(&e),
    })
}

/// Re-serialise `text` in the requested style.
pub fn format_json(text: &str, style: JsonStyle) -> ClickozResult<String> {
    let value = validate_json(text)?;
    let out = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(&value),
        JsonStyle::Minified => serde_json::to_string(&value),
    };
    // Serialising a parsed `Value` back to a string cannot fail.
    Ok(out.unwrap_or_default())
}

/// Pretty-print `text` if it is a JSON object or array, else `None`.
pub fn prettify_if_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    format_json(trimmed, JsonStyle::Pretty).ok()
}

/// serde_json's message without its trailing " at line L column C".
fn describe(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rfind(" at line ") {
        Some(idx) => full[..idx].to_string(),
        None => full,
    }
}
