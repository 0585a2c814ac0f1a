// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tjrs - offline-first client library for the trip journal server.
//!
//! This crate provides the functionality behind the `tj` CLI: a sync layer
//! that keeps working while the trip server is unreachable.
//!
//! # Main Components
//!
//! - [`sync::SyncEngine`] - routes reads and writes online or offline and drains the queue
//! - [`sync::RemoteApi`] / [`sync::HttpApi`] - the trip server's HTTP API
//! - [`sync::ConnectivityProbe`] - decides online vs offline per operation
//! - [`Config`] - server URL and timeouts from `config.toml`
//! - [`Error`] - Error types for all CLI operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tjrs::sync::{HealthProbe, HttpApi, SyncEngine};
//!
//! let api = HttpApi::new("http://localhost:4000", Duration::from_secs(10))?;
//! let probe = HealthProbe::new("http://localhost:4000", Duration::from_secs(2));
//! let engine = SyncEngine::new(api, probe, Arc::new(SqliteKv::open(path)?));
//!
//! let trip = engine.create_trip(TripInput::new("Kyoto")).await?;
//! let report = engine.sync().await?;
//! ```

mod cli;
mod commands;
mod display;
mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, TripArgs};
pub use config::Config;
pub use error::{Error, Result};

use std::path::PathBuf;

use commands::Context;

/// Execute a CLI invocation against the default state directory.
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);
    run_in(config::state_dir(), cli)
}

/// Execute a CLI invocation against the state directory `dir`.
pub fn run_in(dir: PathBuf, cli: Cli) -> Result<()> {
    // Init runs before any store or runtime exists.
    if let Command::Init { server } = &cli.command {
        return commands::init::run(&dir, server.as_deref());
    }

    let ctx = Context::open(dir, cli.offline)?;
    tracing::debug!(dir = %ctx.dir.display(), server = %ctx.config.server_url, "opened state");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(&ctx, cli.command))
}

async fn execute(ctx: &Context, command: Command) -> Result<()> {
    let engine = &ctx.engine;
    match command {
        Command::Init { .. } => Ok(()),
        Command::List { output } => commands::list::run(engine, output).await,
        Command::New { trip, output } => commands::new::run(engine, trip.into_input()?, output).await,
        Command::Rm { id } => commands::rm::run(engine, &id).await,
        Command::Sync { watch: true, .. } => {
            commands::sync::run_watch(engine, ctx.config.watch_interval()).await
        }
        Command::Sync { output, .. } => commands::sync::run(engine, output).await,
        Command::Queue { output } => commands::queue::run(engine, output),
        Command::Upload { path } => commands::upload::run(engine, &PathBuf::from(path)).await,
        Command::Status { output } => {
            commands::status::run(engine, &ctx.config.server_url, output).await
        }
    }
}


#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
