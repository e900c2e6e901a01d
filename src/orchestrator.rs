//! Drives the full per-region pipeline: parallel channel generation,
//! extraction, filter-rank, one opportunistic refill, link verification
//! (business mode), and a final dedupe pass. A failed channel or refill
//! degrades a region toward fewer events; it never aborts the request.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::BUSINESS_CHANNELS;
use crate::error::Result;
use crate::generator::EventGenerator;
use crate::pipeline::dedupe::dedupe_events;
use crate::pipeline::extract::extract_events;
use crate::pipeline::link_check::{LinkProber, LinkVerifier};
use crate::pipeline::rank::{filter_rank_layered, RankOptions};
use crate::pipeline::region::in_service_territory;
use crate::prompts;
use crate::types::{Event, FindRequest, Region, RegionResults};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Business,
    Public,
}

impl Mode {
    fn refill_focus(&self) -> &'static str {
        match self {
            Mode::Business => "business-focused",
            Mode::Public => "public/community",
        }
    }
}

/// Request parameters after applying per-mode defaults.
#[derive(Debug, Clone, Copy)]
struct ResolvedParams {
    days: i64,
    allow_unknown_dates: bool,
    target_per_state: usize,
    extended_horizon_days: i64,
    verify_links: bool,
}

pub struct Orchestrator {
    generator: Arc<dyn EventGenerator>,
    verifier: LinkVerifier,
    config: Config,
}

impl Orchestrator {
    pub fn new(
        generator: Arc<dyn EventGenerator>,
        prober: Arc<dyn LinkProber>,
        config: Config,
    ) -> Self {
        Self {
            generator,
            verifier: LinkVerifier::new(prober),
            config,
        }
    }

    /// Runs the four regions concurrently and returns the full result map.
    /// The only fatal failure is an unusable generator (missing credential);
    /// everything below that degrades per region.
    pub async fn find_events(&self, mode: Mode, request: &FindRequest) -> Result<RegionResults> {
        self.generator.check_ready()?;

        let params = self.resolve_params(mode, request);
        let today = Local::now().date_naive();

        let (massachusetts, maine, rhode_island, vermont) = tokio::join!(
            self.run_region(Region::Massachusetts, mode, params, today),
            self.run_region(Region::Maine, mode, params, today),
            self.run_region(Region::RhodeIsland, mode, params, today),
            self.run_region(Region::Vermont, mode, params, today),
        );

        let mut results = RegionResults::default();
        results.set(Region::Massachusetts, massachusetts);
        results.set(Region::Maine, maine);
        results.set(Region::RhodeIsland, rhode_island);
        results.set(Region::Vermont, vermont);
        Ok(results)
    }

    fn resolve_params(&self, mode: Mode, request: &FindRequest) -> ResolvedParams {
        let defaults = match mode {
            Mode::Business => &self.config.business,
            Mode::Public => &self.config.public,
        };
        ResolvedParams {
            days: request.days.unwrap_or(defaults.days),
            allow_unknown_dates: request
                .allow_unknown_dates
                .unwrap_or(defaults.allow_unknown_dates),
            target_per_state: request.target_per_state.unwrap_or(defaults.target_per_state),
            extended_horizon_days: defaults.extended_horizon_days,
            verify_links: defaults.verify_links,
        }
    }

    async fn run_region(
        &self,
        region: Region,
        mode: Mode,
        params: ResolvedParams,
        today: NaiveDate,
    ) -> Vec<Event> {
        let merged = self.generate_channels(region, mode, params, today).await;
        info!(region = region.name(), raw = merged.len(), "channels merged");

        let mut filtered = self.process(merged, mode, params, today);

        // One opportunistic refill when the region came up light.
        let refill_floor =
            (params.target_per_state as f64 * self.config.pipeline.refill_trigger_fraction).floor()
                as usize;
        if filtered.len() < refill_floor {
            match self.refill(region, mode, params, today, &filtered).await {
                Ok(refill_events) => {
                    let mut combined = filtered;
                    combined.extend(refill_events);
                    filtered = self.process(combined, mode, params, today);
                }
                Err(e) => {
                    warn!(region = region.name(), error = %e, "refill failed");
                }
            }
        }

        if params.verify_links {
            filtered = self.verify_links(filtered).await;
        }

        // Final safety pass.
        let result = dedupe_events(filtered);
        info!(region = region.name(), kept = result.len(), "region complete");
        result
    }

    /// Issues one generation call per channel concurrently, collecting all
    /// settled outcomes. A failed channel is logged and contributes nothing.
    async fn generate_channels(
        &self,
        region: Region,
        mode: Mode,
        params: ResolvedParams,
        today: NaiveDate,
    ) -> Vec<Event> {
        let prompts = self.channel_prompts(region, mode, params, today);
        let mut set = JoinSet::new();
        for (index, prompt) in prompts.into_iter().enumerate() {
            let generator = self.generator.clone();
            set.spawn(async move { (index, generator.generate(&prompt).await) });
        }

        // Settled results are merged back in channel order so ranking ties
        // stay deterministic.
        let mut per_channel: Vec<Vec<Event>> = Vec::new();
        per_channel.resize_with(set.len(), Vec::new);
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(text))) => per_channel[index] = extract_events(&text),
                Ok((index, Err(e))) => {
                    warn!(region = region.name(), channel = index, error = %e, "channel failed");
                }
                Err(e) => {
                    warn!(region = region.name(), error = %e, "channel task panicked");
                }
            }
        }
        per_channel.into_iter().flatten().collect()
    }

    fn channel_prompts(
        &self,
        region: Region,
        mode: Mode,
        params: ResolvedParams,
        today: NaiveDate,
    ) -> Vec<String> {
        let future = today + Duration::days(params.days);
        match mode {
            Mode::Business => {
                let channels = BUSINESS_CHANNELS.len();
                let per_channel_target =
                    std::cmp::max(8, params.target_per_state.div_ceil(channels));
                BUSINESS_CHANNELS
                    .iter()
                    .map(|channel| {
                        prompts::build_channel_prompt(
                            region,
                            channel,
                            today,
                            future,
                            params.days,
                            per_channel_target,
                        )
                    })
                    .collect()
            }
            Mode::Public => vec![prompts::build_public_prompt(
                region,
                today,
                future,
                params.days,
                params.target_per_state,
            )],
        }
    }

    /// Mode-specific cleanup plus layered filter-rank.
    fn process(
        &self,
        mut events: Vec<Event>,
        mode: Mode,
        params: ResolvedParams,
        today: NaiveDate,
    ) -> Vec<Event> {
        match mode {
            Mode::Business => events.retain(in_service_territory),
            Mode::Public => events.iter_mut().for_each(Event::coerce_topic),
        }
        let opts = RankOptions {
            days: params.days,
            extended_horizon_days: params.extended_horizon_days,
            allow_unknown_dates: params.allow_unknown_dates,
            target: params.target_per_state,
            credible_min_score: self.config.pipeline.credible_min_score,
            unmatched_link_score: self.config.pipeline.unmatched_link_score,
        };
        filter_rank_layered(events, &opts, today)
    }

    async fn refill(
        &self,
        region: Region,
        mode: Mode,
        params: ResolvedParams,
        today: NaiveDate,
        collected: &[Event],
    ) -> Result<Vec<Event>> {
        let exclude_names: Vec<String> = collected
            .iter()
            .filter_map(|event| event.name.as_deref())
            .map(|name| name.chars().take(80).collect::<String>())
            .filter(|name| !name.is_empty())
            .collect();
        let prompt = prompts::build_refill_prompt(
            region,
            today,
            today + Duration::days(params.days),
            params.days,
            &exclude_names,
            params.target_per_state,
            mode.refill_focus(),
        );
        let text = self.generator.generate(&prompt).await?;
        Ok(extract_events(&text))
    }

    /// Probes every surviving record concurrently, each with its own
    /// deadline, and replaces `link` with the verified URL or null.
    async fn verify_links(&self, events: Vec<Event>) -> Vec<Event> {
        let mut set = JoinSet::new();
        let mut events: Vec<Event> = events;
        for (index, event) in events.iter().enumerate() {
            let verifier = self.verifier.clone();
            let event = event.clone();
            set.spawn(async move {
                let verified = verifier.verify(&event).await;
                (index, verified)
            });
        }
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, verified)) => events[index].link = verified,
                Err(e) => warn!(error = %e, "link verification task panicked"),
            }
        }
        events
    }
}
