//! Duplicate collapsing keyed on normalized link, falling back to a
//! name/city/state/date composite. Records that yield no key at all cannot
//! be deduplicated safely and are treated as unusable.

use std::collections::HashSet;

use crate::types::Event;

/// The identity key for an event: the lower-cased link when present and
/// non-empty, otherwise the lower-cased pipe-joined present fields of
/// name/city/state/date. Without a link or a name the record carries no
/// identity and the key is `None`.
pub fn identity_key(event: &Event) -> Option<String> {
    if let Some(link) = event.link.as_deref() {
        let link = link.trim();
        if !link.is_empty() {
            return Some(link.to_lowercase());
        }
    }

    event.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

    let composite: Vec<&str> = [
        event.name.as_deref(),
        event.city.as_deref(),
        event.state.as_deref(),
        event.date.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    Some(composite.join("|").to_lowercase())
}

/// Removes duplicates, keeping the first occurrence and its relative order.
/// Keyless records are dropped entirely.
pub fn dedupe_events(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        let Some(key) = identity_key(&event) else {
            continue;
        };
        if seen.insert(key) {
            out.push(event);
        }
    }
    out
}
