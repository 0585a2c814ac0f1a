// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconnect watcher.
//!
//! Polls connectivity and runs a sync pass each time the remote comes back
//! (and once at startup if it is already reachable). While online, it also
//! runs a pass whenever the queue holds actions the previous pass did not
//! leave behind, such as ones queued by another `tj` process. Actions that
//! keep failing wait for the next reconnect or the next new action.

use std::time::Duration;

use tokio::sync::watch;

use super::api::RemoteApi;
use super::engine::{SyncEngine, SyncError};
use super::probe::ConnectivityProbe;

/// Totals accumulated across a watch session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Sync passes that ran to completion.
    pub passes: usize,
    pub synced: usize,
    pub failed: usize,
}

/// Watch connectivity until `shutdown` becomes true (or its sender is dropped).
pub async fn watch_and_sync<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> WatchSummary {
    let mut summary = WatchSummary::default();
    let mut was_online = false;
    // Ids still queued after the last pass.
    let mut left_behind: Vec<String> = Vec::new();

    loop {
        if *shutdown.borrow() {
            break;
        }

        let online = engine.is_online().await;
        let reconnected = online && !was_online;
        let fresh = online
            && pending_ids(engine)
                .iter()
                .any(|id| !left_behind.contains(id));

        if reconnected || fresh {
            if reconnected {
                tracing::info!("remote reachable, syncing");
            } else {
                tracing::info!("new actions queued, syncing");
            }
            match engine.sync().await {
                Ok(report) => {
                    summary.passes += 1;
                    summary.synced += report.synced;
                    summary.failed += report.failed;
                    tracing::info!(
                        synced = report.synced,
                        failed = report.failed,
                        "watch sync done"
                    );
                    left_behind = pending_ids(engine);
                }
                Err(SyncError::SyncInProgress) => {
                    tracing::debug!("sync already running, skipping");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "watch sync failed");
                    left_behind = pending_ids(engine);
                }
            }
        } else if !online && was_online {
            tracing::info!("remote unreachable, queuing until it returns");
        }
        was_online = online;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    summary
}

fn pending_ids<A: RemoteApi, P: ConnectivityProbe>(engine: &SyncEngine<A, P>) -> Vec<String> {
    match engine.pending() {
        Ok(actions) => actions.into_iter().map(|a| a.id).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read offline queue");
            Vec::new()
        }
    }
}
