//! The defensive post-processing pipeline that turns raw generator text into
//! a usable event list. Data flows strictly downward: raw text -> extracted
//! JSON -> raw records -> filtered/ranked/deduplicated records ->
//! (optionally) link-repaired records.

pub mod credibility;
pub mod dates;
pub mod dedupe;
pub mod extract;
pub mod link_check;
pub mod rank;
pub mod region;
