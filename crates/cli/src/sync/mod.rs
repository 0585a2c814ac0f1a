// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync layer for the trip server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Engine    │────►│  RemoteApi  │────►│    Trip     │
//! │(SyncEngine) │◄────│   (trait)   │◄────│   Server    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!    │    │    │
//!    │    │    └──────► ConnectivityProbe (trait)
//!    ▼    ▼
//! ┌──────────┐ ┌──────────┐
//! │  Queue   │ │  Cache   │   (one KvStore key each)
//! └──────────┘ └──────────┘
//! ```
//!
//! # Features
//!
//! - Connectivity re-checked on every operation, failing closed to offline
//! - Durable FIFO queue of offline mutations, safe to share between processes
//! - Single-slot cache of the last trip listing
//! - Optimistic local ids, reconciled when the queued create is delivered
//! - One sync pass at a time; per-action failures never abort a pass
//! - Watcher that syncs on reconnect and when new actions are queued
//! - Injectable client, probe and store for testing

mod api;
mod cache;
mod engine;
mod probe;
mod queue;
mod watch;

pub use api::{ApiError, ApiResult, HttpApi, RemoteApi, UPLOADS_ENDPOINT};
pub use cache::{TripCache, CACHE_KEY};
pub use engine::{DeleteOutcome, Reconciled, SyncEngine, SyncError, SyncReport, SyncResult};
pub use probe::{ConnectivityProbe, FixedProbe, HealthProbe, HEALTH_ENDPOINT};
pub use queue::{ActionQueue, QUEUE_KEY};
pub use watch::{watch_and_sync, WatchSummary};

#[cfg(test)]
pub(crate) mod test_helpers;
