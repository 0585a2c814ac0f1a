// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration and state directory layout.
//!
//! Everything lives in one state directory:
//! - `config.toml`: server URL, timeouts, forced-offline flag
//! - `store.db`: the SQLite key-value store holding the queue and cache
//!
//! A missing `config.toml` means defaults; `tj init` writes one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "tj";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_FILE_NAME: &str = "store.db";

/// Default trip server address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

/// Client configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the trip server.
    pub server_url: String,
    /// Treat the server as unreachable without probing.
    pub offline: bool,
    /// Health probe timeout in milliseconds.
    pub probe_timeout_ms: u64,
    /// Per-request timeout for API calls in seconds.
    pub request_timeout_secs: u64,
    /// Poll interval of `tj sync --watch` in seconds.
    pub watch_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: DEFAULT_SERVER_URL.to_string(),
            offline: false,
            probe_timeout_ms: 2_000,
            request_timeout_secs: 10,
            watch_interval_secs: 15,
        }
    }
}

impl Config {
    /// Creates a config pointing at `server_url`, other fields defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidServerUrl`] unless the URL is http(s).
    pub fn with_server(server_url: &str) -> Result<Self> {
        let config = Config {
            server_url: server_url.trim_end_matches('/').to_string(),
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `dir`, falling back to defaults if the file
    /// does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Checks values that would otherwise fail later at request time.
    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(Error::InvalidServerUrl(self.server_url.clone()));
        }
        if self.probe_timeout_ms == 0 || self.request_timeout_secs == 0 {
            return Err(Error::Config("timeouts must be greater than zero".to_string()));
        }
        if self.watch_interval_secs == 0 {
            return Err(Error::Config(
                "watch_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs)
    }
}

/// Resolve the state directory.
///
/// Order: `TJ_STATE_DIR`, then `$XDG_STATE_HOME/tj`, then the platform
/// state (or data) directory joined with `tj`.
pub fn state_dir() -> PathBuf {
    resolve_state_dir(env::state_dir(), env::xdg_state_home())
}

pub(crate) fn resolve_state_dir(explicit: Option<PathBuf>, xdg_state: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = xdg_state {
        return dir.join(APP_DIR_NAME);
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".tj"))
}

/// Path of the key-value store inside `dir`.
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE_NAME)
}

/// Path of the config file inside `dir`.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Create `dir` and write a fresh `config.toml` into it.
pub fn init_state_dir(dir: &Path, config: &Config) -> Result<()> {
    let path = config_path(dir);
    if path.exists() {
        return Err(Error::AlreadyInitialized(path.display().to_string()));
    }
    fs::create_dir_all(dir)?;
    config.save(dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
