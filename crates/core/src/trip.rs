// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Trip records and the cached trip snapshot.
//!
//! Field names follow the trip server's JSON shape (`startDate`, `endDate`,
//! `cachedAt`), so these types serialize straight onto the wire and into
//! the local store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Prefix marking a trip id that was minted locally while offline.
///
/// Server ids are UUIDs and never carry this prefix.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Date format accepted for `startDate` / `endDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Geographic coordinates attached to a trip by the server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A journey as stored by the trip server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Trip {
    /// Builds a trip from user input and an id.
    pub fn from_input(id: String, input: TripInput) -> Self {
        Trip {
            id,
            title: input.title,
            destination: input.destination,
            start_date: input.start_date,
            end_date: input.end_date,
            description: input.description,
            image: input.image,
            photos: input.photos,
            location: input.location,
        }
    }

    /// Returns true if this trip has not been acknowledged by the server yet.
    pub fn is_local(&self) -> bool {
        is_local_id(&self.id)
    }
}

/// A trip as submitted for creation (no id yet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    pub title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl TripInput {
    /// Creates an input with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        TripInput {
            title: title.into(),
            ..TripInput::default()
        }
    }

    /// Checks the title and date range.
    ///
    /// Empty dates are allowed; the server stores them as empty strings.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidTrip("title cannot be empty".to_string()));
        }

        let start = parse_optional_date(&self.start_date)?;
        let end = parse_optional_date(&self.end_date)?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(Error::InvalidTrip(format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                )));
            }
        }

        Ok(())
    }
}

/// The last successful trip listing, persisted as a single slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedTripsSnapshot {
    pub data: Vec<Trip>,
    pub cached_at: DateTime<Utc>,
}

impl CachedTripsSnapshot {
    /// Captures `data` with the current time.
    pub fn now(data: Vec<Trip>) -> Self {
        CachedTripsSnapshot {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// Mints a new local trip id (`local-<uuid v7>`).
pub fn new_local_id() -> String {
    format!("{}{}", LOCAL_ID_PREFIX, Uuid::now_v7().simple())
}

/// Returns true if `id` was minted locally.
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(value).map(Some)
    }
}

#[cfg(test)]
#[path = "trip_tests.rs"]
mod tests;
