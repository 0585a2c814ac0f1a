// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tj-core operations.

use thiserror::Error;

/// All possible errors that can occur in tj-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid trip: {0}")]
    InvalidTrip(String),

    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data under key '{key}': {reason}")]
    CorruptedData { key: String, reason: String },

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// A specialized Result type for tj-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
