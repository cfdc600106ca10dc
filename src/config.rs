use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dashboard::WaitingMode;
use crate::poller::PollIntervals;
use crate::view::Filters;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const URL_ENV: &str = "REPODASH_URL";
pub const LOG_ENV: &str = "REPODASH_LOG";

const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub repos_interval_secs: u64,
    pub updated_interval_secs: u64,
    pub updating_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub waiting_mode: WaitingMode,
    pub theme: Option<String>,
    pub log_level: String,
    pub filters: Filters,
    pub keybinds: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            repos_interval_secs: 5,
            updated_interval_secs: 5,
            updating_interval_secs: 1,
            request_timeout_secs: 10,
            waiting_mode: WaitingMode::default(),
            theme: None,
            log_level: "info".to_string(),
            filters: Filters::default(),
            keybinds: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(level) = lookup(LOG_ENV).filter(|value| !value.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn poll_intervals(&self) -> PollIntervals {
        let updating = match self.waiting_mode {
            WaitingMode::UpdatingPoll => Some(seconds(self.updating_interval_secs)),
            WaitingMode::Timestamp => None,
        };
        PollIntervals {
            repos: seconds(self.repos_interval_secs),
            last_updated: seconds(self.updated_interval_secs),
            updating,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        seconds(self.request_timeout_secs)
    }

    /// How long the repository list may go without a successful fetch before
    /// the dashboard calls it stale.
    pub fn stale_after(&self) -> Duration {
        seconds(self.repos_interval_secs).saturating_mul(3)
    }
}

// Zero would make tokio's interval panic.
fn seconds(value: u64) -> Duration {
    Duration::from_secs(value.clamp(1, MAX_INTERVAL_SECS))
}

pub fn config_path() -> PathBuf {
    config_dir().join("repodash").join("config.toml")
}

pub fn log_path() -> PathBuf {
    state_dir().join("repodash").join("repodash.log")
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config");
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn state_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_STATE_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".local").join("state");
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
