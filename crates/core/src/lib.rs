// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tj-core: Shared library for the tj trip journal
//!
//! This crate provides the trip and queued-action types and the key-value
//! persistence primitive used by the offline sync layer.

pub mod action;
pub mod error;
pub mod kv;
pub mod trip;

pub use action::{
    new_action_id, trip_endpoint, ActionKind, HttpMethod, NewAction, QueuedAction, TRIPS_ENDPOINT,
};
pub use error::{Error, Result};
pub use kv::{load_json, store_json, update_json, Edit, KvStore, MemoryKv, SqliteKv};
pub use trip::{
    is_local_id, new_local_id, parse_date, CachedTripsSnapshot, Location, Trip, TripInput,
    LOCAL_ID_PREFIX,
};
