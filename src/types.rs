use serde::{Deserialize, Serialize};

use crate::constants::{OTHER_TOPIC, TOPIC_TAXONOMY};

/// One of the four fixed geographic result buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Massachusetts,
    Maine,
    RhodeIsland,
    Vermont,
}

impl Region {
    /// Full state name, used as the result-map key and in prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Massachusetts => "Massachusetts",
            Region::Maine => "Maine",
            Region::RhodeIsland => "Rhode Island",
            Region::Vermont => "Vermont",
        }
    }
}

/// An event record as produced by the generator. Every field is free text
/// and optional; the pipeline never creates records, only filters and
/// repairs them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "audienceType", skip_serializing_if = "Option::is_none")]
    pub audience_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "contactInfo", skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    // Always serialized: a null link means "verified unavailable", which the
    // display layer renders differently from a missing record.
    pub link: Option<String>,
    #[serde(rename = "whyBBBShouldBeThere", skip_serializing_if = "Option::is_none")]
    pub why_bbb_should_be_there: Option<String>,
}

impl Event {
    /// Coerces `topic` into the closed taxonomy; unknown values become
    /// "Other" rather than dropping the record.
    pub fn coerce_topic(&mut self) {
        if let Some(topic) = &self.topic {
            if !TOPIC_TAXONOMY.contains(&topic.as_str()) {
                self.topic = Some(OTHER_TOPIC.to_string());
            }
        }
    }
}

/// The unit returned to the caller: every request gets all four keys, each
/// defaulting to an empty list. Rebuilt fresh per request.
#[derive(Debug, Default, Serialize)]
pub struct RegionResults {
    #[serde(rename = "Massachusetts")]
    pub massachusetts: Vec<Event>,
    #[serde(rename = "Maine")]
    pub maine: Vec<Event>,
    #[serde(rename = "Rhode Island")]
    pub rhode_island: Vec<Event>,
    #[serde(rename = "Vermont")]
    pub vermont: Vec<Event>,
}

impl RegionResults {
    pub fn set(&mut self, region: Region, events: Vec<Event>) {
        match region {
            Region::Massachusetts => self.massachusetts = events,
            Region::Maine => self.maine = events,
            Region::RhodeIsland => self.rhode_island = events,
            Region::Vermont => self.vermont = events,
        }
    }

    pub fn get(&self, region: Region) -> &[Event] {
        match region {
            Region::Massachusetts => &self.massachusetts,
            Region::Maine => &self.maine,
            Region::RhodeIsland => &self.rhode_island,
            Region::Vermont => &self.vermont,
        }
    }
}

/// Recognized optional fields of the inbound request body. Missing fields
/// fall back to per-mode defaults from the configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindRequest {
    pub days: Option<i64>,
    #[serde(rename = "allowUnknownDates")]
    pub allow_unknown_dates: Option<bool>,
    #[serde(rename = "targetPerState")]
    pub target_per_state: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_topic_keeps_taxonomy_values() {
        let mut event = Event {
            topic: Some("Scam Prevention".to_string()),
            ..Default::default()
        };
        event.coerce_topic();
        assert_eq!(event.topic.as_deref(), Some("Scam Prevention"));
    }

    #[test]
    fn test_coerce_topic_rewrites_unknown_values() {
        let mut event = Event {
            topic: Some("Something Else Entirely".to_string()),
            ..Default::default()
        };
        event.coerce_topic();
        assert_eq!(event.topic.as_deref(), Some("Other"));
    }

    #[test]
    fn test_coerce_topic_ignores_absent_topic() {
        let mut event = Event::default();
        event.coerce_topic();
        assert_eq!(event.topic, None);
    }

    #[test]
    fn test_event_deserializes_upstream_field_names() {
        let event: Event = serde_json::from_str(
            r#"{
                "date": "May 1, 2025",
                "city": "Boston",
                "state": "MA",
                "name": "Small Business Expo",
                "audienceType": "Small business owners",
                "contactInfo": "events@example.org",
                "link": "https://example.org/expo",
                "whyBBBShouldBeThere": "Local reach"
            }"#,
        )
        .unwrap();
        assert_eq!(event.audience_type.as_deref(), Some("Small business owners"));
        assert_eq!(event.contact_info.as_deref(), Some("events@example.org"));
        assert_eq!(event.why_bbb_should_be_there.as_deref(), Some("Local reach"));
    }

    #[test]
    fn test_region_results_always_has_four_keys() {
        let results = RegionResults::default();
        let json = serde_json::to_value(&results).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 4);
        for key in ["Massachusetts", "Maine", "Rhode Island", "Vermont"] {
            assert!(map.get(key).unwrap().as_array().unwrap().is_empty());
        }
    }
}
