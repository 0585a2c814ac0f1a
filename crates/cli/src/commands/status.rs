// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

use super::print_json;

/// Snapshot printed by `tj status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub server_url: String,
    pub online: bool,
    pub pending: usize,
    pub cached_at: Option<DateTime<Utc>>,
}

pub async fn collect<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    server_url: &str,
) -> Result<Status> {
    Ok(Status {
        server_url: server_url.to_string(),
        online: engine.is_online().await,
        pending: engine.pending()?.len(),
        cached_at: engine.cached_at()?,
    })
}

pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    server_url: &str,
    output: OutputFormat,
) -> Result<()> {
    let status = collect(engine, server_url).await?;
    match output {
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Text | OutputFormat::Id => println!(
            "{}",
            format_status(
                &status.server_url,
                status.online,
                status.pending,
                status.cached_at
            )
        ),
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
