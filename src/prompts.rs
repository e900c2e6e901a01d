//! Prompt builders. The text content is an opaque contract with the
//! generator; the pipeline only cares that responses should be strict JSON
//! with an `events` array.

use chrono::NaiveDate;

use crate::constants::{city_hints, Channel, TOPIC_TAXONOMY};
use crate::types::Region;

fn us_date(date: NaiveDate) -> String {
    // en-US short form, e.g. 3/15/2025.
    format!("{}/{}/{}", date.format("%-m"), date.format("%-d"), date.format("%Y"))
}

/// One business-mode channel prompt for a region.
pub fn build_channel_prompt(
    region: Region,
    channel: &Channel,
    today: NaiveDate,
    future: NaiveDate,
    days: i64,
    per_channel_target: usize,
) -> String {
    let cities = city_hints(region)
        .iter()
        .take(10)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"You are assisting the Better Business Bureau.

Return ONLY strict JSON (no prose, no markdown). Shape:
{{
  "events": [
    {{
      "date": "Month Day, Year",
      "time": "optional, e.g. 2:00 PM - 5:00 PM",
      "city": "City",
      "state": "MA|ME|RI|VT",
      "county": "County if known",
      "location": "Venue or address",
      "cost": "Free or $amount",
      "name": "Event Name",
      "audienceType": "Small business owners, professionals, contractors, retailers, manufacturers, start-ups, etc.",
      "contactInfo": "email@domain.com or null",
      "link": "https://official-source",
      "whyBBBShouldBeThere": "Short reason"
    }}
  ]
}}

STATE: {state}
HORIZON: AFTER {today} and BEFORE {future} (next {days} days)
FOCUS: {channel_name} - {channel_focus}
CITY HINTS (for coverage, optional): {cities}

Rules:
- Prefer official sources (.gov, chambers, associations, SBA/SBDC/SCORE, universities, economic development).
- Events must be real; if unsure, omit it.
- Use proper state code (MA, ME, RI, VT).
- Return up to {per_channel_target} events for this channel."#,
        state = region.name(),
        today = us_date(today),
        future = us_date(future),
        days = days,
        channel_name = channel.name,
        channel_focus = channel.focus,
        cities = if cities.is_empty() { "n/a".to_string() } else { cities },
        per_channel_target = per_channel_target,
    )
}

/// The single supplementary prompt issued when a region is under-filled,
/// excluding the names already collected. `focus` distinguishes the two
/// modes ("business-focused" vs "public/community").
pub fn build_refill_prompt(
    region: Region,
    today: NaiveDate,
    future: NaiveDate,
    days: i64,
    exclude_names: &[String],
    want: usize,
    focus: &str,
) -> String {
    format!(
        r#"You are assisting the Better Business Bureau.

Return ONLY strict JSON:
{{ "events": [ /* same shape as before */ ] }}

STATE: {state}
HORIZON: AFTER {today} and BEFORE {future} (next {days} days)
TASK: Find {want} ADDITIONAL real {focus} events NOT in this list (case-insensitive):
{exclude}

Prioritize official sources (.gov, chambers, associations, SBA/SBDC/SCORE, economic development, universities).
Return as many as you can up to {want}."#,
        state = region.name(),
        today = us_date(today),
        future = us_date(future),
        days = days,
        want = want,
        focus = focus,
        exclude = exclude_names.join(" | "),
    )
}

/// The public/community events prompt for a region.
pub fn build_public_prompt(
    region: Region,
    today: NaiveDate,
    future: NaiveDate,
    days: i64,
    target_per_state: usize,
) -> String {
    format!(
        r#"You are assisting the Better Business Bureau.

Return ONLY strict JSON (no prose, no markdown). Shape:
{{
  "events": [
    {{
      "date": "Month Day, Year",
      "time": "optional, e.g. 10:00 AM - 3:00 PM",
      "city": "City",
      "state": "MA|ME|RI|VT",
      "location": "Venue or address",
      "cost": "Free or $amount",
      "name": "Event Name",
      "topic": "One of: {taxonomy}",
      "contactInfo": "email@domain.com or null",
      "link": "https://official-source",
      "whyBBBShouldBeThere": "Short reason"
    }}
  ]
}}

TASK: List up to {target} REAL public/community events in {state} occurring AFTER {today} and BEFORE {future} (next {days} days).
Event types: festivals, fairs, town days, parades, library/community programs, university public lectures, consumer shred days, scam-prevention talks, senior expos, farmers markets.

Rules:
- Prefer official sources (.gov, .edu, libraries, universities, chambers, tourism boards, city sites).
- If unsure an event is real, OMIT it.
- "topic" MUST be chosen from the list above; if uncertain, pick "Other".
- Use "Free" or a $ value for cost if known; otherwise omit the field.
- Use proper state code (MA, ME, RI, VT) for "state".
- If you cannot find {target}, return as many as you can without inventing."#,
        state = region.name(),
        today = us_date(today),
        future = us_date(future),
        days = days,
        target = target_per_state,
        taxonomy = TOPIC_TAXONOMY.join(", "),
    )
}
