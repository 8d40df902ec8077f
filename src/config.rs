//! Resolved runtime configuration.
//!
//! [`Config`] is built once at startup from the CLI/environment
//! ([`Settings`]) and an optional YAML sources file, then shared read-only
//! behind an `Arc`. Nothing reads the environment after this point.

use crate::cli::Settings;
use crate::error::{Result, ScrapeError};
use rand::{Rng, rng};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_FALLBACK_API_URL: &str = "https://api.scrapfly.io/scrape";

pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub fallback_api_key: Option<String>,
    pub fallback_api_url: String,
    pub listing_timeout: Duration,
    pub detail_timeout: Duration,
    pub request_delay: Duration,
    pub concurrency: usize,
    pub sources: SourcesConfig,
}

/// Contents of the optional `SOURCES_CONFIG` YAML file.
///
/// ```yaml
/// default_article_cap: 1
/// sources:
///   lebaneseforces:
///     article_cap: 3
///   mtv:
///     enabled: false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default)]
    pub default_article_cap: Option<usize>,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceOverride {
    #[serde(default)]
    pub article_cap: Option<usize>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl SourcesConfig {
    /// Source keys are case-insensitive, like registry lookups.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut parsed: Self = serde_yaml::from_str(yaml)?;
        let mut sources = BTreeMap::new();
        for (id, source) in parsed.sources {
            let id = id.to_ascii_lowercase();
            if sources.insert(id.clone(), source).is_some() {
                return Err(ScrapeError::Config(format!("source '{id}' is configured twice")));
            }
        }
        parsed.sources = sources;
        Ok(parsed)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        let parsed = Self::from_yaml(&yaml)?;
        info!(overrides = parsed.sources.len(), "Loaded sources config");
        Ok(parsed)
    }
}

impl Config {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let request_delay = Duration::try_from_secs_f64(settings.request_delay).map_err(|e| {
            ScrapeError::Config(format!("invalid request delay {}: {e}", settings.request_delay))
        })?;
        if settings.concurrency == 0 {
            return Err(ScrapeError::Config("concurrency must be at least 1".into()));
        }
        let sources = match &settings.sources_config {
            Some(path) => SourcesConfig::load(path)?,
            None => SourcesConfig::default(),
        };

        let config = Self {
            fallback_api_key: settings
                .scrapfly_api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            fallback_api_url: settings.scrapfly_api_url.clone(),
            listing_timeout: Duration::from_secs(settings.request_timeout),
            detail_timeout: Duration::from_secs(settings.detail_timeout),
            request_delay,
            concurrency: settings.concurrency,
            sources,
        };

        if !config.has_fallback() {
            warn!("SCRAPFLY_API_KEY not set; blocked sites will fail instead of using the fallback service");
        }
        Ok(config)
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback_api_key.is_some()
    }

    /// Browser-like headers with one agent picked from [`USER_AGENTS`].
    pub fn default_headers(&self) -> BTreeMap<String, String> {
        let agent = USER_AGENTS[rng().random_range(0..USER_AGENTS.len())];
        BTreeMap::from([
            ("User-Agent".to_string(), agent.to_string()),
            (
                "Accept".to_string(),
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            ),
            ("Accept-Language".to_string(), "en-US,en;q=0.5".to_string()),
        ])
    }

    /// Per-source override, then the file-wide default, then the extractor's own default.
    pub fn article_cap(&self, source_id: &str, extractor_default: usize) -> usize {
        self.sources
            .sources
            .get(&source_id.to_ascii_lowercase())
            .and_then(|o| o.article_cap)
            .or(self.sources.default_article_cap)
            .unwrap_or(extractor_default)
    }

    pub fn is_enabled(&self, source_id: &str) -> bool {
        self.sources
            .sources
            .get(&source_id.to_ascii_lowercase())
            .is_none_or(|o| o.enabled)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_api_key: None,
            fallback_api_url: DEFAULT_FALLBACK_API_URL.to_string(),
            listing_timeout: Duration::from_secs(15),
            detail_timeout: Duration::from_secs(10),
            request_delay: Duration::from_secs(1),
            concurrency: 4,
            sources: SourcesConfig::default(),
        }
    }
}
