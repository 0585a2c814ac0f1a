// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use tj_core::SqliteKv;

use crate::config::{init_state_dir, store_path, Config};
use crate::error::Result;

pub fn run(dir: &Path, server: Option<&str>) -> Result<()> {
    let config = match server {
        Some(url) => Config::with_server(url)?,
        None => Config::default(),
    };
    init_state_dir(dir, &config)?;

    // Create the store up front so later commands find the schema in place.
    SqliteKv::open(&store_path(dir))?;

    println!("Initialized trip journal at {}", dir.display());
    println!("Server: {}", config.server_url);
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
