// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for command output.

use chrono::{DateTime, Utc};
use tj_core::{QueuedAction, Trip};

use crate::sync::{DeleteOutcome, SyncReport, WatchSummary};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line per trip: id, title, dates, destination.
///
/// Trips still waiting for delivery are marked `[pending]`.
pub fn format_trip(trip: &Trip) -> String {
    let mut line = format!("{}  {}", trip.id, trip.title);
    match (trip.start_date.as_str(), trip.end_date.as_str()) {
        ("", "") => {}
        (start, "") => line.push_str(&format!("  from {}", start)),
        ("", end) => line.push_str(&format!("  until {}", end)),
        (start, end) => line.push_str(&format!("  {}..{}", start, end)),
    }
    if !trip.destination.is_empty() {
        line.push_str(&format!("  @ {}", trip.destination));
    }
    if trip.is_local() {
        line.push_str("  [pending]");
    }
    line
}

pub fn format_trip_list(trips: &[Trip]) -> String {
    if trips.is_empty() {
        return "No trips".to_string();
    }
    trips.iter().map(format_trip).collect::<Vec<_>>().join("\n")
}

/// Confirmation printed by `tj new`.
pub fn format_created(trip: &Trip) -> String {
    if trip.is_local() {
        format!(
            "Queued {}: {} (offline, will sync when the server is reachable)",
            trip.id, trip.title
        )
    } else {
        format!("Created {}: {}", trip.id, trip.title)
    }
}

pub fn format_deleted(id: &str, outcome: &DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Deleted => format!("Deleted {}", id),
        DeleteOutcome::Queued(_) => format!("Queued delete of {} (offline)", id),
        DeleteOutcome::Cancelled { withdrawn: 0 } => {
            format!("Nothing pending for {}", id)
        }
        DeleteOutcome::Cancelled { .. } => format!("Withdrew pending trip {}", id),
    }
}

/// One queued action: when, what, where.
pub fn format_action(action: &QueuedAction) -> String {
    let mut line = format!(
        "{}  {:<6} {:<6} {}",
        action.enqueued_at.format(TIMESTAMP_FORMAT),
        action.kind.as_str(),
        action.method.as_str(),
        action.endpoint
    );
    if let Some(title) = action.payload.get("title").and_then(|t| t.as_str()) {
        line.push_str(&format!("  \"{}\"", title));
    }
    if let Some(local_id) = &action.local_id {
        line.push_str(&format!("  ({})", local_id));
    }
    line
}

pub fn format_queue(actions: &[QueuedAction]) -> String {
    if actions.is_empty() {
        return "Queue is empty".to_string();
    }
    let mut out = format!("{} pending {}:", actions.len(), plural(actions.len(), "action"));
    for action in actions {
        out.push_str("\n  ");
        out.push_str(&format_action(action));
    }
    out
}

pub fn format_report(report: &SyncReport) -> String {
    let mut out = format!("synced: {}, failed: {}", report.synced, report.failed);
    for done in &report.reconciled {
        out.push_str(&format!("\n  {} -> {}", done.local_id, done.server_id));
    }
    out
}

pub fn format_watch_summary(summary: &WatchSummary) -> String {
    format!(
        "{} sync {}; synced: {}, failed: {}",
        summary.passes,
        plural(summary.passes, "pass"),
        summary.synced,
        summary.failed
    )
}

pub fn format_status(
    server_url: &str,
    online: bool,
    pending: usize,
    cached_at: Option<DateTime<Utc>>,
) -> String {
    let cached = cached_at
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "server:  {} ({})\npending: {}\ncached:  {}",
        server_url,
        if online { "online" } else { "offline" },
        pending,
        cached
    )
}

fn plural(count: usize, word: &str) -> String {
    match (count, word) {
        (1, _) => word.to_string(),
        (_, "pass") => "passes".to_string(),
        _ => format!("{}s", word),
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
