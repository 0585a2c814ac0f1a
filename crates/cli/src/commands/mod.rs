// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod list;
pub mod new;
pub mod queue;
pub mod rm;
pub mod status;
pub mod sync;
pub mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tj_core::SqliteKv;

use crate::config::{store_path, Config};
use crate::env;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, FixedProbe, HealthProbe, HttpApi, SyncEngine};

/// Engine as wired by the CLI: HTTP client plus a probe chosen by config.
pub type Engine = SyncEngine<HttpApi, Box<dyn ConnectivityProbe>>;

/// Everything a command needs: where state lives, how to reach the server,
/// and the engine built from both.
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub engine: Engine,
}

impl Context {
    /// Load config from `dir` (plus `TJ_SERVER_URL`) and open the store.
    pub fn open(dir: PathBuf, force_offline: bool) -> Result<Self> {
        let mut config = Config::load(&dir)?;
        if let Some(url) = env::server_url() {
            config.server_url = url;
            config.validate()?;
        }
        if force_offline {
            config.offline = true;
        }
        let engine = build_engine(&dir, &config)?;
        Ok(Context {
            dir,
            config,
            engine,
        })
    }
}

/// Build the engine over the store in `dir`.
///
/// `offline = true` swaps the health probe for one that always answers
/// offline, so nothing is sent until it is turned off.
pub fn build_engine(dir: &Path, config: &Config) -> Result<Engine> {
    let kv = SqliteKv::open(&store_path(dir))?;
    let api = HttpApi::new(&config.server_url, config.request_timeout())?;
    let probe: Box<dyn ConnectivityProbe> = if config.offline {
        Box::new(FixedProbe::offline())
    } else {
        Box::new(HealthProbe::new(&config.server_url, config.probe_timeout()))
    };
    Ok(SyncEngine::new(api, probe, Arc::new(kv)))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
