//! Request identifier extraction and backend acknowledgment detection

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::types::{value_as_string, LogEntry};
use crate::constants::REQUEST_ID_KEYS;

/// Matches `requestID=abc`, `request_id: "abc"`, `Request ID R123` ...
static REQUEST_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn request_id_pattern() -> &'static Regex {
    REQUEST_ID_PATTERN.get_or_init(|| {
        // SAFETY: compile-time constant pattern, covered by tests.
        Regex::new(concat!(
            r#"(?i)\brequest[_ ]?id\b["']?\s*(?P<sep>[:=])?\s*["']?"#,
            r#"(?P<id>[A-Za-z0-9][A-Za-z0-9._:\-]*)"#,
        ))
        .expect("Invalid request ID regex - this is a compile-time bug")
    })
}

/// Spelling variants folded together before marker matching
const ACK_SPELLINGS: &[(&str, &str)] = &[("acknowledgement", "acknowledgment")];

fn normalize_marker_text(text: &str) -> String {
    ACK_SPELLINGS
        .iter()
        .fold(text.to_lowercase(), |acc, &(from, to)| acc.replace(from, to))
}

/// Depth-first search for the first request ID key holding a scalar value
fn find_request_id(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => REQUEST_ID_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(value_as_string))
            .or_else(|| map.values().find_map(find_request_id)),
        Value::Array(items) => items.iter().find_map(find_request_id),
        _ => None,
    }
}

/// Scan an entry for a request identifier
///
/// Structured payload keys are preferred; the message text is only searched
/// when no key is present. Returns `None` when the entry carries no request
/// identifier.
pub fn extract_request_id(entry: &LogEntry) -> Option<String> {
    if let Some(id) = entry.json_payload.as_ref().and_then(find_request_id) {
        return Some(id);
    }

    // Without a `:`/`=` separator the value must contain a digit, so prose
    // such as "request id is missing" is not mistaken for an identifier.
    let text = entry.message()?;
    request_id_pattern().captures_iter(&text).find_map(|caps| {
        let id = caps.name("id")?.as_str();
        let separated = caps.name("sep").is_some();
        if separated || id.chars().any(|c| c.is_ascii_digit()) {
            Some(id.to_string())
        } else {
            None
        }
    })
}

/// Whether an entry is a backend acknowledgment log
///
/// `marker` is compared case-insensitively against the entry message;
/// "acknowledgement" and "acknowledgment" are treated as the same word.
pub fn is_backend_ack(entry: &LogEntry, marker: &str) -> bool {
    let marker = normalize_marker_text(marker.trim());
    if marker.is_empty() {
        return false;
    }
    entry
        .message()
        .map(|m| normalize_marker_text(&m).contains(&marker))
        .unwrap_or(false)
}
