//! Best-effort cleanup of model responses that should be JSON.
//!
//! Responses may arrive wrapped in a markdown fence and may be cut off
//! mid-structure when the generator hits its output cap. The repair here
//! is deliberately narrow: it recovers arrays truncated between elements
//! and objects truncated inside a string value, and nothing else. Callers
//! rely on it failing predictably outside that envelope, so keep the
//! boundary where it is.

use serde_json::Value;

/// Sentinel returned when repair gives up; parses to an empty object.
const REPAIR_FAILED: &str = "{}";

/// Strip a markdown code fence (with or without a `json` tag) from around
/// a response body. Empty input becomes an empty JSON array; input with
/// no fence passes through trimmed.
pub fn clean_json_block(text: &str) -> String {
    if text.is_empty() {
        return "[]".to_string();
    }
    let mut clean = text.trim();
    if let Some(rest) = clean
        .strip_prefix("```json")
        .or_else(|| clean.strip_prefix("```"))
    {
        clean = rest.trim_start();
        if let Some(rest) = clean.strip_suffix("```") {
            clean = rest.trim_end();
        }
    }
    clean.to_string()
}

/// Try to make truncated JSON parseable again.
///
/// Already-valid input is returned unchanged. An array cut off
/// mid-element is truncated back to its last complete object and closed.
/// An object is only salvageable when the cut landed inside a string
/// value: the closing quote and brace are appended blind, which fails for
/// truncations anywhere else in the structure. Every unrecoverable path
/// returns the `{}` sentinel.
pub fn repair_truncated_json(text: &str) -> String {
    let trimmed = text.trim();
    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return trimmed.to_string();
    }

    if trimmed.starts_with('[') {
        if let Some(last_brace) = trimmed.rfind('}') {
            let candidate = format!("{}]", &trimmed[..=last_brace]);
            if serde_json::from_str::<Value>(&candidate).is_ok() {
                return candidate;
            }
            tracing::warn!("array repair failed even after truncation fix");
        }
    }

    if trimmed.starts_with('{') && trimmed.contains('"') {
        let candidate = format!("{trimmed}\"}}");
        if serde_json::from_str::<Value>(&candidate).is_ok() {
            return candidate;
        }
    }

    REPAIR_FAILED.to_string()
}

/// Clean, parse, and repair-on-failure. The returned value is the repair
/// sentinel (an empty object) when nothing was recoverable.
pub fn parse_lenient(text: &str) -> Value {
    let clean = clean_json_block(text);
    match serde_json::from_str(&clean) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("response JSON parse failed, attempting repair");
            let repaired = repair_truncated_json(&clean);
            serde_json::from_str(&repaired).unwrap_or(Value::Object(serde_json::Map::new()))
        }
    }
}
