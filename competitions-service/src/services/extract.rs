//! Best-effort extraction of a JSON array from free-form model output.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Greedy span from the first `[` to the last `]`, newlines included.
fn array_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid"))
}

/// Pull the first JSON array literal out of model output.
///
/// Models routinely wrap the requested array in prose or code fences, so the
/// bracketed span is located first and only then parsed. Returns `None` when
/// no span exists or the span is not valid JSON array text; element shape is
/// deliberately not validated.
pub fn extract_json_array(text: &str) -> Option<Value> {
    let span = array_span().find(text)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(value) if value.is_array() => Some(value),
        _ => None,
    }
}
