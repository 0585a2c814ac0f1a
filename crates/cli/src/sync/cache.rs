// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-slot cache of the last trip listing.
//!
//! There is at most one snapshot. Every write replaces it as a whole with a
//! fresh `cachedAt`; nothing is merged. There is no eviction.

use std::sync::Arc;

use tj_core::{load_json, store_json, update_json, CachedTripsSnapshot, KvStore, Trip};

/// Store key holding the serialized snapshot.
pub const CACHE_KEY: &str = "tj.cached_trips";

/// Result type for cache operations.
pub type CacheResult<T> = tj_core::Result<T>;

/// Read cache for the trip collection.
pub struct TripCache {
    kv: Arc<dyn KvStore>,
}

impl TripCache {
    /// Create a cache backed by `kv`.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        TripCache { kv }
    }

    /// Overwrite the snapshot with `trips`.
    pub fn save(&self, trips: &[Trip]) -> CacheResult<()> {
        let snapshot = CachedTripsSnapshot::now(trips.to_vec());
        store_json(self.kv.as_ref(), CACHE_KEY, &snapshot)?;
        tracing::debug!(count = snapshot.data.len(), "cached trip snapshot");
        Ok(())
    }

    /// Return the cached trips, or `None` if nothing was ever saved.
    pub fn load(&self) -> CacheResult<Option<Vec<Trip>>> {
        Ok(self.snapshot()?.map(|s| s.data))
    }

    /// Return the full snapshot including its timestamp.
    pub fn snapshot(&self) -> CacheResult<Option<CachedTripsSnapshot>> {
        load_json(self.kv.as_ref(), CACHE_KEY)
    }

    /// Load the cached trips, apply `edit`, and save the result as a new snapshot.
    ///
    /// Starts from an empty list if nothing is cached. The load and the save
    /// happen as one atomic store update.
    pub fn rewrite(&self, edit: impl FnOnce(&mut Vec<Trip>)) -> CacheResult<()> {
        update_json(
            self.kv.as_ref(),
            CACHE_KEY,
            |snapshot: Option<CachedTripsSnapshot>| {
                let mut trips = snapshot.map(|s| s.data).unwrap_or_default();
                edit(&mut trips);
                tracing::debug!(count = trips.len(), "rewrote trip snapshot");
                Ok(Some(CachedTripsSnapshot::now(trips)))
            },
        )
    }
}
