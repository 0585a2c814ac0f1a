// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync engine.
//!
//! Every operation re-checks connectivity. Online, calls go straight to the
//! remote. Offline, reads come from the trip cache and mutations are queued
//! with an optimistic local echo. [`SyncEngine::sync`] drains the queue in
//! FIFO order, one action at a time.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tj_core::{
    is_local_id, new_local_id, ActionKind, KvStore, NewAction, QueuedAction, Trip, TripInput,
};

use super::api::{ApiError, HttpApi, RemoteApi};
use super::cache::TripCache;
use super::probe::{ConnectivityProbe, HealthProbe};
use super::queue::ActionQueue;

/// Error type for sync engine operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Remote call failed.
    #[error("remote call failed: {0}")]
    Api(#[from] ApiError),

    /// Local store could not be read or written.
    #[error("local store error: {0}")]
    Store(#[from] tj_core::Error),

    /// Operation needs the network.
    #[error("offline: {0} requires a connection to the trip server")]
    Offline(&'static str),

    /// Another sync pass holds the queue.
    #[error("a sync pass is already running")]
    SyncInProgress,
}

/// Result type for sync engine operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// A local trip id replaced by the id the server assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciled {
    pub local_id: String,
    pub server_id: String,
}

/// Outcome of a sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Actions delivered and removed from the queue.
    pub synced: usize,
    /// Actions that failed and remain queued.
    pub failed: usize,
    /// Local ids resolved by delivered creates.
    pub reconciled: Vec<Reconciled>,
}

/// Outcome of [`SyncEngine::delete_trip`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Deleted on the server.
    Deleted,
    /// Queued for delivery on the next sync.
    Queued(QueuedAction),
    /// A local-only trip; its pending create was withdrawn.
    Cancelled { withdrawn: usize },
}

/// Clears the in-flight flag when a sync pass ends, however it ends.
struct SyncGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SyncGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncGuard { flag })
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Sync engine owning the queue, the cache and its remote collaborators.
pub struct SyncEngine<A: RemoteApi = HttpApi, P: ConnectivityProbe = HealthProbe> {
    api: A,
    probe: P,
    queue: ActionQueue,
    cache: TripCache,
    /// Set while a sync pass is draining the queue.
    syncing: AtomicBool,
}

impl<A: RemoteApi, P: ConnectivityProbe> SyncEngine<A, P> {
    /// Create an engine whose queue and cache persist in `kv`.
    pub fn new(api: A, probe: P, kv: Arc<dyn KvStore>) -> Self {
        SyncEngine {
            api,
            probe,
            queue: ActionQueue::new(Arc::clone(&kv)),
            cache: TripCache::new(kv),
            syncing: AtomicBool::new(false),
        }
    }

    /// Current connectivity, re-checked on every call.
    pub async fn is_online(&self) -> bool {
        self.probe.is_online().await
    }

    /// Pending actions in delivery order.
    pub fn pending(&self) -> SyncResult<Vec<QueuedAction>> {
        Ok(self.queue.list()?)
    }

    /// The cached trip listing, if any.
    pub fn cached_trips(&self) -> SyncResult<Option<Vec<Trip>>> {
        Ok(self.cache.load()?)
    }

    /// Timestamp of the cached listing, if any.
    pub fn cached_at(&self) -> SyncResult<Option<chrono::DateTime<chrono::Utc>>> {
        Ok(self.cache.snapshot()?.map(|s| s.cached_at))
    }

    /// List trips.
    ///
    /// Online, fetches from the server and replaces the cache. If the fetch
    /// fails, or when offline, serves the cache. Never fails: a missing or
    /// unreadable cache yields an empty list.
    pub async fn get_trips(&self) -> Vec<Trip> {
        if !self.probe.is_online().await {
            tracing::info!("offline: serving cached trips");
            return self.cached_or_empty();
        }

        match self.api.list_trips().await {
            Ok(trips) => {
                if let Err(e) = self.cache.save(&trips) {
                    tracing::warn!(error = %e, "failed to cache trip listing");
                }
                trips
            }
            Err(e) => {
                tracing::warn!(error = %e, "trip fetch failed, serving cached trips");
                self.cached_or_empty()
            }
        }
    }

    /// Create a trip.
    ///
    /// Online, the server's answer (or failure) is returned as is; nothing is
    /// queued. Offline, a `Create` action is queued and a trip carrying a
    /// local id is returned and echoed into the cache.
    pub async fn create_trip(&self, input: TripInput) -> SyncResult<Trip> {
        if self.probe.is_online().await {
            let trip = self.api.create_trip(&input).await?;
            tracing::info!(id = %trip.id, "created trip");
            return Ok(trip);
        }

        let local_id = new_local_id();
        self.queue.append(NewAction::create_trip(&input, &local_id)?)?;
        let trip = Trip::from_input(local_id, input);

        let echo = trip.clone();
        if let Err(e) = self.cache.rewrite(|trips| trips.push(echo)) {
            tracing::warn!(error = %e, local_id = %trip.id, "failed to echo queued trip into cache");
        }

        tracing::info!(local_id = %trip.id, "offline: trip queued for creation");
        Ok(trip)
    }

    /// Delete a trip.
    ///
    /// A local id never reaches the server: its pending create is withdrawn
    /// instead. Otherwise the delete goes out immediately when online, or is
    /// queued when offline. The trip leaves the cache in every case.
    pub async fn delete_trip(&self, id: &str) -> SyncResult<DeleteOutcome> {
        if is_local_id(id) {
            let pending = self.queue.list()?.into_iter().filter(|a| {
                a.kind == ActionKind::Create && a.local_id.as_deref() == Some(id)
            });
            let mut withdrawn = 0;
            for action in pending {
                if self.queue.remove(&action.id)? {
                    withdrawn += 1;
                }
            }
            self.cache.rewrite(|trips| trips.retain(|t| t.id != id))?;
            tracing::info!(local_id = %id, withdrawn, "withdrew pending trip");
            return Ok(DeleteOutcome::Cancelled { withdrawn });
        }

        let outcome = if self.probe.is_online().await {
            self.api.delete_trip(id).await?;
            tracing::info!(id = %id, "deleted trip");
            DeleteOutcome::Deleted
        } else {
            let queued = self.queue.append(NewAction::delete_trip(id))?;
            tracing::info!(id = %id, "offline: trip queued for deletion");
            DeleteOutcome::Queued(queued)
        };

        if let Err(e) = self.cache.rewrite(|trips| trips.retain(|t| t.id != id)) {
            tracing::warn!(error = %e, id = %id, "failed to drop deleted trip from cache");
        }
        Ok(outcome)
    }

    /// Upload an image and return its URL. Requires connectivity.
    pub async fn upload_image(&self, path: &Path) -> SyncResult<String> {
        if !self.probe.is_online().await {
            return Err(SyncError::Offline("uploading an image"));
        }
        let url = self.api.upload(path).await?;
        tracing::info!(url = %url, "uploaded image");
        Ok(url)
    }

    /// Drain the offline queue.
    ///
    /// Does nothing when offline. Otherwise delivers every pending action in
    /// enqueue order. A delivered action is removed; a failed one stays queued
    /// and the pass moves on to the next. A delivered action whose removal
    /// cannot be persisted counts as failed and is delivered again later.
    /// Only one pass runs at a time; an overlapping call gets
    /// [`SyncError::SyncInProgress`].
    pub async fn sync(&self) -> SyncResult<SyncReport> {
        let _guard = SyncGuard::acquire(&self.syncing).ok_or(SyncError::SyncInProgress)?;

        let mut report = SyncReport::default();
        if !self.probe.is_online().await {
            tracing::debug!("offline: skipping sync");
            return Ok(report);
        }

        let actions = self.queue.list()?;
        if actions.is_empty() {
            return Ok(report);
        }

        tracing::info!(count = actions.len(), "draining offline queue");

        for action in actions {
            match self
                .api
                .send(action.method, &action.endpoint, &action.payload)
                .await
            {
                Ok(body) => {
                    match self.queue.remove(&action.id) {
                        Ok(true) => report.synced += 1,
                        Ok(false) => {}
                        Err(e) => {
                            // Still queued, so the next pass delivers it again.
                            report.failed += 1;
                            tracing::error!(
                                action_id = %action.id,
                                kind = %action.kind,
                                error = %e,
                                "delivered but could not be dequeued"
                            );
                        }
                    }
                    tracing::debug!(action_id = %action.id, kind = %action.kind, "delivered");

                    let reconciled = match (action.kind, &action.local_id) {
                        (ActionKind::Create, Some(local_id)) => self.reconcile(local_id, body),
                        _ => None,
                    };
                    report.reconciled.extend(reconciled);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        action_id = %action.id,
                        kind = %action.kind,
                        error = %e,
                        "delivery failed, action stays queued"
                    );
                }
            }
        }

        tracing::info!(
            synced = report.synced,
            failed = report.failed,
            "sync pass finished"
        );
        Ok(report)
    }

    /// Swap a delivered local trip for the server's copy in the cache.
    fn reconcile(&self, local_id: &str, body: Option<Value>) -> Option<Reconciled> {
        let trip: Trip = match body.map(serde_json::from_value) {
            Some(Ok(trip)) => trip,
            _ => {
                tracing::warn!(local_id, "create response carried no trip, cannot reconcile");
                return None;
            }
        };

        let server_id = trip.id.clone();
        let result = self.cache.rewrite(|trips| {
            if let Some(slot) = trips.iter_mut().find(|t| t.id == local_id) {
                *slot = trip;
            }
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, local_id, "failed to reconcile cached trip");
        }

        tracing::info!(local_id, server_id = %server_id, "reconciled trip id");
        Some(Reconciled {
            local_id: local_id.to_string(),
            server_id,
        })
    }

    fn cached_or_empty(&self) -> Vec<Trip> {
        match self.cache.load() {
            Ok(trips) => trips.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read trip cache");
                Vec::new()
            }
        }
    }
}
