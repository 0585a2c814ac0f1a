// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable queue of mutations made while offline.
//!
//! The whole queue lives under a single key as a JSON array in FIFO order.
//! Every append and remove rewrites that array, so the persisted queue is
//! always a complete, ordered snapshot. Records are never edited in place.

use std::sync::Arc;

use chrono::Utc;
use tj_core::{load_json, new_action_id, update_json, KvStore, NewAction, QueuedAction};

/// Store key holding the serialized queue.
pub const QUEUE_KEY: &str = "tj.offline_queue";

/// Result type for queue operations.
pub type QueueResult<T> = tj_core::Result<T>;

/// Offline queue for pending mutations.
///
/// Appends and removes are atomic read-modify-write cycles on the store, so
/// several queues (or processes) sharing one store never lose each other's
/// actions.
pub struct ActionQueue {
    kv: Arc<dyn KvStore>,
}

impl ActionQueue {
    /// Create a queue backed by `kv`.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        ActionQueue { kv }
    }

    /// Enqueue an action, assigning its id and timestamp.
    ///
    /// The action is persisted before this returns.
    pub fn append(&self, action: NewAction) -> QueueResult<QueuedAction> {
        let mut queued = action.into_queued(new_action_id(), Utc::now());

        update_json(self.kv.as_ref(), QUEUE_KEY, |queue: Option<Vec<QueuedAction>>| {
            let mut queue = queue.unwrap_or_default();
            while queue.iter().any(|a| a.id == queued.id) {
                queued.id = new_action_id();
            }
            queue.push(queued.clone());
            Ok(Some(queue))
        })?;

        tracing::info!(
            action_id = %queued.id,
            kind = %queued.kind,
            endpoint = %queued.endpoint,
            "queued offline action"
        );
        Ok(queued)
    }

    /// Read all pending actions in enqueue order.
    pub fn list(&self) -> QueueResult<Vec<QueuedAction>> {
        Ok(load_json(self.kv.as_ref(), QUEUE_KEY)?.unwrap_or_default())
    }

    /// Remove the action with `id`.
    ///
    /// Returns false (and writes nothing) if no such action is queued.
    pub fn remove(&self, id: &str) -> QueueResult<bool> {
        let mut removed = false;

        update_json(self.kv.as_ref(), QUEUE_KEY, |queue: Option<Vec<QueuedAction>>| {
            let mut queue = queue.unwrap_or_default();
            let before = queue.len();
            queue.retain(|a| a.id != id);
            removed = queue.len() != before;
            Ok(removed.then_some(queue))
        })?;

        Ok(removed)
    }
}
