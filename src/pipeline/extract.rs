//! Best-effort recovery of an `{"events": [...]}` payload from free-form
//! generator output. The cascade never errors; total failure yields an empty
//! list and the caller treats absence of data as the failure signal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::Event;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^```[\w-]*[ \t]*$").unwrap());

static EVENTS_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""events"\s*:\s*\[(?s:.*?)\]"#).unwrap());

static ARRAY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[^\[{]*"events"\s*:\s*"#).unwrap());

/// Extracts the events array from a raw generator response, trying
/// progressively more forgiving parsers.
pub fn extract_events(text: &str) -> Vec<Event> {
    let cleaned = strip_code_fences(text);
    let cleaned = cleaned.trim();

    // Attempt 1: the whole response is the JSON object we asked for.
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        if let Some(events) = events_from_value(&value) {
            return events;
        }
    }

    // Attempt 2: slice from the first '{' to the last '}' and parse that.
    if let Some(slice) = slice_json_object(cleaned) {
        if let Ok(value) = serde_json::from_str::<Value>(slice) {
            if let Some(events) = events_from_value(&value) {
                return events;
            }
        }
    }

    // Attempt 3: isolate the `"events": [...]` span and parse just the array.
    if let Some(array_text) = extract_events_array(cleaned) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&array_text) {
            return deserialize_records(&items);
        }
    }

    Vec::new()
}

/// Removes markdown code-fence marker lines so the fenced body parses.
fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").into_owned()
}

/// The first-`{`-to-last-`}` substring, when both braces exist.
fn slice_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// The array span of an `"events": [...]` match, with the key prefix
/// stripped. Lazy like the upstream pattern: it stops at the first `]`, so
/// nested arrays inside records defeat it, but by then the cheaper parsers
/// have already had their chance.
fn extract_events_array(text: &str) -> Option<String> {
    let matched = EVENTS_ARRAY.find(text)?;
    Some(ARRAY_PREFIX.replace(matched.as_str(), "").into_owned())
}

fn events_from_value(value: &Value) -> Option<Vec<Event>> {
    let items = value.get("events")?.as_array()?;
    Some(deserialize_records(items))
}

/// Per-record deserialization: one malformed record is skipped without
/// taking down the rest of the batch.
fn deserialize_records(items: &[Value]) -> Vec<Event> {
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<Event>(item.clone()).ok())
        .collect()
}
