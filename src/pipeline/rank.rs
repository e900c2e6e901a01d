//! Layered filter-rank: partitions a merged batch into four quality tiers
//! and concatenates them in priority order until a soft target count is met.
//!
//! Tier A: parseable date, within the primary window.
//! Tier B: parseable date, beyond the window but within an extended horizon.
//! Tier C: unparseable date, kept only when unknown dates are allowed.
//! Tier D: unparseable date, not allowed, but a credible-looking source.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::pipeline::credibility::score_link;
use crate::pipeline::dates::{parse_date_label, within_next_days};
use crate::pipeline::dedupe::{dedupe_events, identity_key};
use crate::types::Event;

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    /// Primary window size in days.
    pub days: i64,
    /// Fallback horizon for dated events past the primary window.
    pub extended_horizon_days: i64,
    pub allow_unknown_dates: bool,
    /// Soft cap: checked before appending each tier, excess is kept.
    pub target: usize,
    /// Minimum credibility for the tier-D last resort.
    pub credible_min_score: i32,
    /// Score for non-empty links matching no credibility rule.
    pub unmatched_link_score: i32,
}

/// Classifies, ranks, and concatenates a region's merged events. Zero
/// qualifying records yields an empty list, which is not an error.
pub fn filter_rank_layered(events: Vec<Event>, opts: &RankOptions, today: NaiveDate) -> Vec<Event> {
    let mut in_window = Vec::new();
    let mut further_out = Vec::new();
    let mut unknown_date = Vec::new();
    let mut credible_unknown = Vec::new();

    for event in events {
        let parsed = event
            .date
            .as_deref()
            .and_then(|label| parse_date_label(label, today));
        match parsed {
            Some(date) if within_next_days(date, today, opts.days) => in_window.push(event),
            Some(date) if within_next_days(date, today, opts.extended_horizon_days) => {
                further_out.push(event)
            }
            Some(_) => {} // past, or beyond the extended horizon
            None if opts.allow_unknown_dates => unknown_date.push(event),
            None => {
                let score = score_link(event.link.as_deref(), opts.unmatched_link_score);
                if score >= opts.credible_min_score {
                    credible_unknown.push(event);
                }
            }
        }
    }

    for tier in [
        &mut in_window,
        &mut further_out,
        &mut unknown_date,
        &mut credible_unknown,
    ] {
        sort_by_credibility(tier, opts.unmatched_link_score);
    }

    // Tier A is taken whole, even past the target; later tiers only fill the
    // remaining deficit, highest credibility first. Keys already in the
    // result never re-enter from a later tier.
    let mut out = dedupe_events(in_window);
    let mut seen: HashSet<String> = out.iter().filter_map(identity_key).collect();
    for tier in [further_out, unknown_date, credible_unknown] {
        for event in tier {
            if out.len() >= opts.target {
                break;
            }
            let Some(key) = identity_key(&event) else {
                continue;
            };
            if seen.insert(key) {
                out.push(event);
            }
        }
    }
    out
}

/// Stable descending sort by credibility; ties keep the order as received.
fn sort_by_credibility(events: &mut [Event], unmatched_default: i32) {
    events.sort_by_key(|event| {
        std::cmp::Reverse(score_link(event.link.as_deref(), unmatched_default))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(target: usize, allow_unknown_dates: bool) -> RankOptions {
        RankOptions {
            days: 120,
            extended_horizon_days: 240,
            allow_unknown_dates,
            target,
            credible_min_score: 2,
            unmatched_link_score: 0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn event(name: &str, date: Option<&str>, link: Option<&str>) -> Event {
        Event {
            name: Some(name.to_string()),
            date: date.map(str::to_string),
            link: link.map(str::to_string),
            ..Default::default()
        }
    }

    fn dated(today: NaiveDate, days_out: i64) -> String {
        (today + chrono::Duration::days(days_out))
            .format("%B %d, %Y")
            .to_string()
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_deref().unwrap()).collect()
    }

    #[test]
    fn test_tier_order_and_soft_cap() {
        let today = today();
        let mut input = Vec::new();
        // 3 in-window events with mixed credibility.
        input.push(event("a-low", Some(&dated(today, 10)), Some("https://example.com")));
        input.push(event("a-gov", Some(&dated(today, 20)), Some("https://mass.gov/a")));
        input.push(event("a-mid", Some(&dated(today, 30)), Some("https://chamber.example.com")));
        // 2 events ~200 days out: inside the extended horizon only.
        input.push(event("b-1", Some(&dated(today, 200)), Some("https://example.com/b1")));
        input.push(event("b-2", Some(&dated(today, 201)), Some("https://example.com/b2")));
        // 5 with unparseable dates.
        input.push(event("c-low-1", Some("TBD"), Some("https://example.com/c1")));
        input.push(event("c-gov", Some("TBD"), Some("https://maine.gov/c")));
        input.push(event("c-low-2", Some("TBD"), Some("https://example.com/c2")));
        input.push(event("c-mid", Some("TBD"), Some("https://association.example.com")));
        input.push(event("c-low-3", Some("TBD"), Some("https://example.com/c3")));

        let out = filter_rank_layered(input, &opts(8, true), today);

        // Tier A first by descending credibility, then tier B, then tier C
        // fills the remaining three slots highest-credibility first. Tiers
        // never interleave.
        assert_eq!(
            names(&out),
            vec!["a-gov", "a-mid", "a-low", "b-1", "b-2", "c-gov", "c-mid", "c-low-1"]
        );
    }

    #[test]
    fn test_tier_a_excess_is_never_trimmed() {
        let today = today();
        let input: Vec<Event> = (0..5)
            .map(|i| {
                event(
                    &format!("a-{i}"),
                    Some(&dated(today, 5 + i)),
                    Some(&format!("https://a{i}.example")),
                )
            })
            .collect();
        let out = filter_rank_layered(input, &opts(3, true), today);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_target_met_by_early_tiers_skips_later_tiers() {
        let today = today();
        let input = vec![
            event("a-1", Some(&dated(today, 5)), Some("https://a1.example")),
            event("a-2", Some(&dated(today, 6)), Some("https://a2.example")),
            event("c-1", Some("TBD"), Some("https://c1.example")),
        ];
        let out = filter_rank_layered(input, &opts(2, true), today);
        assert_eq!(names(&out), vec!["a-1", "a-2"]);
    }

    #[test]
    fn test_past_and_beyond_horizon_dates_are_dropped() {
        let today = today();
        let input = vec![
            event("past", Some(&dated(today, -5)), Some("https://p.example")),
            event("far", Some(&dated(today, 300)), Some("https://f.example")),
        ];
        assert!(filter_rank_layered(input, &opts(10, true), today).is_empty());
    }

    #[test]
    fn test_unknown_dates_dropped_unless_credible_when_flag_off() {
        let today = today();
        let input = vec![
            event("tbd-low", Some("TBD"), Some("https://example.com")),
            event("tbd-gov", Some("TBD"), Some("https://vermont.gov/x")),
            event("tbd-none", None, None),
        ];
        let out = filter_rank_layered(input, &opts(10, false), today);
        assert_eq!(names(&out), vec!["tbd-gov"]);
    }

    #[test]
    fn test_duplicates_collapse_across_tiers() {
        let today = today();
        let input = vec![
            event("strict", Some(&dated(today, 5)), Some("https://same.example")),
            event("tbd dup", Some("TBD"), Some("https://same.example")),
            event("tbd other", Some("TBD"), Some("https://other.example")),
        ];
        let out = filter_rank_layered(input, &opts(10, true), today);
        assert_eq!(names(&out), vec!["strict", "tbd other"]);
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        assert!(filter_rank_layered(Vec::new(), &opts(10, true), today()).is_empty());
    }
}
