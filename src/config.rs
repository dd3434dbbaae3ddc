//! Configuration management for starcatalog
//!
//! Handles config file loading and the catalog endpoint fallback chain.
//! Config is stored at ~/.config/starcatalog/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::swapi::DEFAULT_BASE_URL;
use crate::catalog::{BatchPolicy, BrowserOptions};

/// Environment variable overriding the catalog endpoint
pub const BASE_URL_ENV: &str = "STARCATALOG_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "starcatalog=info";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// What a partially failed batch yields
    pub batch_policy: Option<BatchPolicy>,
    /// Ignore names already on the shortlist
    pub dedupe_shortlist: Option<bool>,
    /// Log file for the TUI
    pub log_file: Option<PathBuf>,
    /// tracing filter directive, e.g. "starcatalog=debug"
    pub log_filter: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/starcatalog/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("starcatalog").join("config.toml"))
    }

    /// Load config from the default path, or return default if missing or invalid
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Catalog base URL with fallback chain:
    /// 1. Environment variable STARCATALOG_BASE_URL
    /// 2. `base_url` from the config file
    /// 3. The public SWAPI endpoint
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(BASE_URL_ENV).ok())
    }

    fn base_url_with(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            batch_policy: self.batch_policy.unwrap_or_default(),
            dedupe_shortlist: self.dedupe_shortlist.unwrap_or(false),
        }
    }

    /// Log file path (~/.cache/starcatalog/starcatalog.log unless configured)
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|p| p.join("starcatalog").join("starcatalog.log"))
        })
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
