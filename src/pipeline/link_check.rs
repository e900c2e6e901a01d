//! Live verification and repair of generator-supplied links. Candidates are
//! probed in order with a short per-probe timeout; the first reachable URL
//! wins. Exhaustion yields `None`, which the display layer renders as
//! "link unavailable" rather than dropping the event.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use tracing::debug;

use crate::error::Result;
use crate::types::Event;

static EMAIL_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})").unwrap());

/// Organizer keywords mapped to well-known event-listing pages, tried when
/// every candidate derived from the supplied link has failed.
const ORGANIZER_FALLBACKS: &[(&str, &str)] = &[
    ("sba", "https://www.sba.gov/events"),
    ("score", "https://www.score.org/events"),
    ("sbdc", "https://americassbdc.org/events/"),
    ("eventbrite", "https://www.eventbrite.com"),
    ("meetup", "https://www.meetup.com"),
];

const ORIGIN_SUFFIXES: &[&str] = &["/events", "/calendar", "/event"];

/// Reachability check for a single URL. A trait seam so tests can probe
/// without the network.
#[async_trait]
pub trait LinkProber: Send + Sync {
    async fn probe(&self, url: &str) -> bool;
}

/// HEAD-first prober with a hard per-probe timeout. Servers that reject or
/// fail the HEAD get one GET retry for the same URL.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkProber for HttpProber {
    async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) if resp.status().is_success() => return true,
            Ok(resp) => debug!(url, status = %resp.status(), "HEAD probe rejected, retrying as GET"),
            Err(e) => debug!(url, error = %e, "HEAD probe failed, retrying as GET"),
        }
        match self.client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(url, error = %e, "GET probe failed");
                false
            }
        }
    }
}

/// Verifies one event's link, returning the first reachable candidate URL.
#[derive(Clone)]
pub struct LinkVerifier {
    prober: Arc<dyn LinkProber>,
}

impl LinkVerifier {
    pub fn new(prober: Arc<dyn LinkProber>) -> Self {
        Self { prober }
    }

    pub async fn verify(&self, event: &Event) -> Option<String> {
        for candidate in primary_candidates(event.link.as_deref()) {
            if self.prober.probe(&candidate).await {
                return Some(candidate);
            }
        }
        for candidate in fallback_candidates(event) {
            if self.prober.probe(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }
}

/// Normalizes a raw link value into a parseable URL, prefixing `https://`
/// when the value lacks a scheme.
pub fn normalize_link(link: &str) -> Option<Url> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(link) {
        return Some(url);
    }
    Url::parse(&format!("https://{}", link)).ok()
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut origin = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{}", port));
    }
    Some(origin)
}

/// Candidates derived from the supplied link: the link itself, then its
/// origin with common event-page suffixes, then the bare origin.
pub fn primary_candidates(link: Option<&str>) -> Vec<String> {
    let Some(url) = link.and_then(normalize_link) else {
        return Vec::new();
    };
    let mut candidates = vec![url.to_string()];
    if let Some(origin) = origin_of(&url) {
        for suffix in ORIGIN_SUFFIXES {
            candidates.push(format!("{}{}", origin, suffix));
        }
        candidates.push(origin);
    }
    candidates.dedup();
    candidates
}

/// Second-chance candidates from organizer-identity heuristics: known
/// organization keywords in the name or link, plus any email-derived origin
/// from the contact field.
pub fn fallback_candidates(event: &Event) -> Vec<String> {
    let mut candidates = Vec::new();

    let haystack = format!(
        "{} {}",
        event.name.as_deref().unwrap_or_default(),
        event.link.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    for (keyword, url) in ORGANIZER_FALLBACKS {
        if haystack.contains(keyword) {
            candidates.push(url.to_string());
        }
    }

    if let Some(contact) = event.contact_info.as_deref() {
        if let Some(captures) = EMAIL_DOMAIN.captures(contact) {
            let origin = format!("https://{}", captures[1].to_lowercase());
            candidates.push(format!("{}/events", origin));
            candidates.push(format!("{}/calendar", origin));
            candidates.push(origin);
        }
    }

    candidates
}
