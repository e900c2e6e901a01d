//! Forgiving normalization of the free-text date labels the generator
//! produces. The evaluation date is threaded in explicitly so tests can pin
//! it; nothing here reads the wall clock.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)(st|nd|rd|th)").unwrap());

// End-of-range day: " – 7," in "Jan 5 – 7, 2025". The trailing delimiter is
// captured and restored since the regex crate has no lookahead.
static RANGE_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s?[-–]\s?\d{1,2}(,|\s|$)").unwrap());

// ISO labels parse as-is and must bypass the range collapse, which would
// otherwise eat the day segment ("2025-05-01" -> "2025-05").
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{4}-\d{1,2}-\d{1,2}\s*$").unwrap());

static SEPT_ABBREV: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSept\b").unwrap());

static FOUR_DIGIT_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

static MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)").unwrap()
});

static BARE_MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{1,2}[/-]\d{1,2}\s*$").unwrap());

/// Formats tried after normalization, most common first.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    // A bare "MM-DD" label gets "/YYYY" appended, producing this hybrid.
    "%m-%d/%Y",
    "%Y-%m-%d",
];

/// Repairs common label defects: ordinal suffixes, date ranges collapsed to
/// their start, and the nonstandard "Sept" abbreviation. ISO `YYYY-MM-DD`
/// labels pass through untouched.
pub fn sanitize_date_label(label: &str) -> String {
    if ISO_DATE.is_match(label) {
        return label.trim().to_string();
    }
    let s = ORDINAL_SUFFIX.replace_all(label, "$1");
    let s = RANGE_TAIL.replace(&s, "$1");
    SEPT_ABBREV.replace_all(&s, "Sep").into_owned()
}

/// Appends the evaluation year when the label has none: after a month name
/// as ", YYYY", after a bare MM/DD or MM-DD as "/YYYY". Labels that already
/// carry a four-digit year pass through untouched.
pub fn ensure_year(label: &str, today: NaiveDate) -> String {
    if FOUR_DIGIT_YEAR.is_match(label) {
        return label.to_string();
    }
    let year = today.format("%Y");
    if MONTH_NAME.is_match(label) {
        return format!("{}, {}", label, year);
    }
    if BARE_MONTH_DAY.is_match(label) {
        return format!("{}/{}", label.trim(), year);
    }
    label.to_string()
}

/// Parses a free-text date label against the evaluation date. Never panics;
/// any failure is reported as `None` and routes the record to the
/// unknown-date tiers.
pub fn parse_date_label(label: &str, today: NaiveDate) -> Option<NaiveDate> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let normalized = ensure_year(&sanitize_date_label(label), today);
    let normalized = normalized.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(normalized, format).ok())
}

/// Half-open window test: strictly after `today`, at most `days` out.
pub fn within_next_days(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    date > today && date <= today + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_sanitize_strips_ordinals() {
        assert_eq!(sanitize_date_label("June 1st, 2025"), "June 1, 2025");
        assert_eq!(sanitize_date_label("May 3RD, 2025"), "May 3, 2025");
        assert_eq!(sanitize_date_label("April 22nd"), "April 22");
    }

    #[test]
    fn test_sanitize_collapses_ranges_to_start() {
        assert_eq!(sanitize_date_label("Jan 5-7, 2025"), "Jan 5, 2025");
        assert_eq!(sanitize_date_label("Jan 5 – 7, 2025"), "Jan 5, 2025");
        assert_eq!(sanitize_date_label("Jan 5–7"), "Jan 5");
    }

    #[test]
    fn test_sanitize_leaves_iso_labels_intact() {
        assert_eq!(sanitize_date_label("2025-05-01"), "2025-05-01");
        assert_eq!(sanitize_date_label(" 2025-5-1 "), "2025-5-1");
        // Hyphenated labels that are not ISO dates still collapse.
        assert_eq!(sanitize_date_label("Jan 5-7, 2025"), "Jan 5, 2025");
    }

    #[test]
    fn test_sanitize_normalizes_sept() {
        assert_eq!(sanitize_date_label("Sept 9, 2025"), "Sep 9, 2025");
        assert_eq!(sanitize_date_label("September 9, 2025"), "September 9, 2025");
    }

    #[test]
    fn test_ensure_year_is_noop_when_year_present() {
        assert_eq!(ensure_year("May 1, 2024", today()), "May 1, 2024");
        assert_eq!(ensure_year("12/31/2026", today()), "12/31/2026");
    }

    #[test]
    fn test_ensure_year_appends_after_month_name() {
        assert_eq!(ensure_year("May 1", today()), "May 1, 2025");
        assert_eq!(ensure_year("Sep 30", today()), "Sep 30, 2025");
    }

    #[test]
    fn test_ensure_year_appends_to_bare_month_day() {
        assert_eq!(ensure_year("5/12", today()), "5/12/2025");
        assert_eq!(ensure_year("5-12", today()), "5-12/2025");
    }

    #[test]
    fn test_ensure_year_leaves_unrecognized_labels_alone() {
        assert_eq!(ensure_year("next Tuesday", today()), "next Tuesday");
    }

    #[test]
    fn test_parse_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(parse_date_label("May 1, 2025", today()), Some(expected));
        assert_eq!(parse_date_label("May 1st, 2025", today()), Some(expected));
        assert_eq!(parse_date_label("May 1", today()), Some(expected));
        assert_eq!(parse_date_label("5/1/2025", today()), Some(expected));
        assert_eq!(parse_date_label("2025-05-01", today()), Some(expected));
        assert_eq!(parse_date_label("2025-5-1", today()), Some(expected));
    }

    #[test]
    fn test_parse_range_uses_start_date() {
        assert_eq!(
            parse_date_label("Jan 5–7, 2026", today()),
            NaiveDate::from_ymd_opt(2026, 1, 5)
        );
    }

    #[test]
    fn test_parse_rejects_unreal_and_unrecognized_dates() {
        assert_eq!(parse_date_label("Feb 30, 2025", today()), None);
        assert_eq!(parse_date_label("TBD", today()), None);
        assert_eq!(parse_date_label("sometime this spring", today()), None);
        assert_eq!(parse_date_label("", today()), None);
    }

    #[test]
    fn test_within_next_days_is_half_open() {
        let base = today();
        assert!(!within_next_days(base, base, 30)); // today itself is out
        assert!(within_next_days(base + Duration::days(1), base, 30));
        assert!(within_next_days(base + Duration::days(30), base, 30)); // inclusive end
        assert!(!within_next_days(base + Duration::days(31), base, 30));
        assert!(!within_next_days(base - Duration::days(1), base, 30));
    }
}
