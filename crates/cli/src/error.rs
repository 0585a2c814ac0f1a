// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{ApiError, SyncError};

/// All possible errors surfaced by the `tj` CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("already initialized: {0} exists")]
    AlreadyInitialized(String),

    #[error("invalid server URL '{0}'\n  hint: use an http:// or https:// address")]
    InvalidServerUrl(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid trip: {0}")]
    InvalidTrip(String),

    #[error("trip server error: {0}")]
    Remote(#[from] ApiError),

    #[error("{0}")]
    Sync(SyncError),

    #[error("local store error: {0}")]
    Store(#[from] tj_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for tjrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Api(e) => Error::Remote(e),
            SyncError::Store(e) => Error::Store(e),
            other => Error::Sync(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
