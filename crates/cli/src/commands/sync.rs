// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use tokio::sync::watch;

use crate::cli::OutputFormat;
use crate::display::{format_report, format_watch_summary};
use crate::error::Result;
use crate::sync::{watch_and_sync, ConnectivityProbe, RemoteApi, SyncEngine};

use super::print_json;

/// Run a single sync pass and print its report.
pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    output: OutputFormat,
) -> Result<()> {
    let report = engine.sync().await?;
    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text | OutputFormat::Id => println!("{}", format_report(&report)),
    }
    Ok(())
}

/// Sync on every reconnect until Ctrl-C.
pub async fn run_watch<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    interval: Duration,
) -> Result<()> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            return;
        }
        let _ = tx.send(true);
    });

    eprintln!(
        "Watching for connectivity every {}s (Ctrl-C to stop)",
        interval.as_secs()
    );
    let summary = watch_and_sync(engine, interval, rx).await;
    println!("{}", format_watch_summary(&summary));
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
