use serde::Deserialize;
use std::fs;

use crate::error::{FinderError, Result};

/// Tunables with built-in defaults, optionally overridden by `config.toml`.
/// The generator credential always comes from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub pipeline: PipelineConfig,
    pub business: ModeDefaults,
    pub public: ModeDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum credibility score for the unknown-date-but-credible tier.
    pub credible_min_score: i32,
    /// Score assigned to non-empty links that match no rule.
    pub unmatched_link_score: i32,
    /// Refill triggers when a region holds less than this fraction of target.
    pub refill_trigger_fraction: f64,
    /// Per-probe timeout for link verification.
    pub probe_timeout_seconds: u64,
}

/// Per-mode request defaults, applied when the caller omits a field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModeDefaults {
    pub days: i64,
    pub target_per_state: usize,
    pub allow_unknown_dates: bool,
    /// Fallback horizon for dated events beyond the primary window.
    pub extended_horizon_days: i64,
    pub verify_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            pipeline: PipelineConfig::default(),
            business: ModeDefaults {
                days: 180,
                target_per_state: 24,
                allow_unknown_dates: true,
                extended_horizon_days: 240,
                verify_links: true,
            },
            public: ModeDefaults {
                days: 120,
                target_per_state: 10,
                allow_unknown_dates: true,
                extended_horizon_days: 180,
                verify_links: false,
            },
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 4500,
            timeout_seconds: 60,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            credible_min_score: 2,
            unmatched_link_score: 0,
            refill_trigger_fraction: 0.8,
            probe_timeout_seconds: 4,
        }
    }
}

impl Default for ModeDefaults {
    fn default() -> Self {
        Config::default().business
    }
}

impl Config {
    /// Loads `config.toml` when present, otherwise returns the defaults.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        match fs::read_to_string(config_path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(FinderError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))),
        }
    }
}
