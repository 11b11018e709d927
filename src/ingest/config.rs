// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::SearchTerm;

pub const ENV_CONFIG_PATH: &str = "GAME_DEALS_CONFIG_PATH";
pub const DEFAULT_FEED_URL: &str =
    "https://www.cheapassgamer.com/rss/forums/1-cheap-ass-gamer-video-game-deals-forum/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5 * 60;

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}
fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatcherConfig {
    /// `None` means "not configured": cycles are skipped with a warning.
    #[serde(default)]
    pub search_terms: Option<Vec<SearchTerm>>,
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            search_terms: None,
            feed_url: default_feed_url(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<WatcherConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
}

/// Load config using env var + fallbacks:
/// 1) $GAME_DEALS_CONFIG_PATH
/// 2) config/game_deals.toml
/// 3) config/game_deals.json
/// 4) defaults (no search terms)
pub fn load_config_default() -> Result<WatcherConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/game_deals.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/game_deals.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(WatcherConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<WatcherConfig> {
    let cfg: WatcherConfig = match hint_ext {
        "toml" => toml::from_str(s).context("parsing toml config")?,
        "json" => serde_json::from_str(s).context("parsing json config")?,
        // No usable extension: JSON documents start with `{`.
        _ if s.trim_start().starts_with('{') => {
            serde_json::from_str(s).context("parsing json config")?
        }
        _ => toml::from_str(s).context("parsing toml config")?,
    };
    Ok(clean(cfg))
}

fn clean(mut cfg: WatcherConfig) -> WatcherConfig {
    if let Some(terms) = cfg.search_terms.take() {
        cfg.search_terms = Some(terms.into_iter().filter(|t| !t.is_blank()).collect());
    }
    if cfg.poll_interval_secs == 0 {
        cfg.poll_interval_secs = default_poll_interval_secs();
    }
    cfg
}
