// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred mutations recorded while offline.
//!
//! A [`QueuedAction`] is immutable once enqueued: it is either delivered and
//! removed, or left untouched for the next sync pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::Result;
use crate::trip::TripInput;

/// Collection endpoint on the trip server.
pub const TRIPS_ENDPOINT: &str = "/trips";

/// Returns the endpoint addressing a single trip.
pub fn trip_endpoint(id: &str) -> String {
    format!("{}/{}", TRIPS_ENDPOINT, id)
}

/// The kind of mutation a queued action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

impl ActionKind {
    /// Returns the HTTP verb used to deliver this kind of action.
    pub fn method(&self) -> HttpMethod {
        match self {
            ActionKind::Create => HttpMethod::Post,
            ActionKind::Update => HttpMethod::Put,
            ActionKind::Delete => HttpMethod::Delete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// HTTP verbs used for mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pending mutation awaiting delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedAction {
    /// Unique within the queue, assigned at enqueue time.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub endpoint: String,
    pub method: HttpMethod,
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
    /// Local trip id echoed to the caller for a queued create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

/// An action before it is enqueued. The queue assigns `id` and `enqueuedAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub kind: ActionKind,
    pub endpoint: String,
    pub payload: Value,
    pub local_id: Option<String>,
}

impl NewAction {
    /// A create of `input` against the trips collection, echoed locally as `local_id`.
    pub fn create_trip(input: &TripInput, local_id: &str) -> Result<Self> {
        Ok(NewAction {
            kind: ActionKind::Create,
            endpoint: TRIPS_ENDPOINT.to_string(),
            payload: serde_json::to_value(input)?,
            local_id: Some(local_id.to_string()),
        })
    }

    /// A delete of the server trip `id`.
    pub fn delete_trip(id: &str) -> Self {
        NewAction {
            kind: ActionKind::Delete,
            endpoint: trip_endpoint(id),
            payload: Value::Null,
            local_id: None,
        }
    }

    /// Stamps the action with its queue identity.
    ///
    /// `method` is always derived from `kind`.
    pub fn into_queued(self, id: String, enqueued_at: DateTime<Utc>) -> QueuedAction {
        QueuedAction {
            id,
            kind: self.kind,
            endpoint: self.endpoint,
            method: self.kind.method(),
            payload: self.payload,
            enqueued_at,
            local_id: self.local_id,
        }
    }
}

/// Generates a queue id. UUID v7 ids sort by creation time.
pub fn new_action_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
