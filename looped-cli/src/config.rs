//! Configuration loading.
//!
//! Values come from `~/.looped/config.toml` (or `--config`), then the
//! `LOOPED_SERVER_URL` environment variable, then command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use looped_core::AnswerPolicy;

pub const SERVER_URL_ENV: &str = "LOOPED_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// 0 disables the timeout
    pub request_timeout_secs: u64,
    /// Delay between upload narration frames
    pub progress_interval_ms: u64,
    pub answer_policy: AnswerPolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 30,
            progress_interval_ms: 1000,
            answer_policy: AnswerPolicy::LockFirst,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file gives defaults, a malformed one warns and gives defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        match toml::from_str(&text) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to parse config {}: {e}", path.display());
                warn!("Using default configuration.");
                Ok(Self::default())
            }
        }
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.server_url = url;
        }
        self
    }

    pub fn with_server_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.server_url = url;
        }
        self
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }

    /// Server URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server_url.trim().trim_end_matches('/')
    }
}
