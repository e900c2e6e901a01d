//! Heuristic source trustworthiness, derived from URL keyword matching. The
//! score only ranks results; it never gates inclusion except for the
//! unknown-date-but-credible tier.

/// One row of the scoring cascade: any keyword hit awards the score.
struct CredibilityRule {
    keywords: &'static [&'static str],
    score: i32,
}

pub const TOP_SCORE: i32 = 3;
pub const MID_SCORE: i32 = 2;
pub const LOW_SCORE: i32 = 1;

/// Evaluated top to bottom, first match wins. Keywords are matched as
/// case-insensitive substrings of the whole URL. This table is the part most
/// likely to change; keep the rules here, not inline in orchestration.
const RULES: &[CredibilityRule] = &[
    CredibilityRule {
        keywords: &[".gov", ".edu"],
        score: TOP_SCORE,
    },
    CredibilityRule {
        keywords: &["sba.gov", "score.org", "sbdc", "economic", "development"],
        score: TOP_SCORE,
    },
    CredibilityRule {
        keywords: &[
            "chamber",
            "association",
            "manufactur",
            "technology",
            "startup",
            "accelerator",
            "incubator",
        ],
        score: MID_SCORE,
    },
    CredibilityRule {
        keywords: &["eventbrite", "meetup"],
        score: LOW_SCORE,
    },
];

/// Scores a link. Absent or empty links score zero; a non-empty link that
/// matches no rule scores `unmatched_default`.
pub fn score_link(link: Option<&str>, unmatched_default: i32) -> i32 {
    let url = match link {
        Some(l) if !l.trim().is_empty() => l.trim().to_lowercase(),
        _ => return 0,
    };
    for rule in RULES {
        if rule.keywords.iter().any(|keyword| url.contains(keyword)) {
            return rule.score;
        }
    }
    unmatched_default
}
