// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value persistence primitive.
//!
//! The offline queue and the trip cache each own one key. Values are JSON
//! text; a slot is always replaced as a whole. Read-modify-write cycles go
//! through [`KvStore::update`], which is atomic across every handle on the
//! same store, including handles held by other processes.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// SQL schema for the key-value store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";

const UPSERT_VALUE: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// Edit applied by [`KvStore::update`]: receives the current value and
/// returns the replacement, or `None` to leave the slot untouched.
pub type Edit<'a> = Box<dyn FnOnce(Option<String>) -> Result<Option<String>> + 'a>;

/// A durable string-to-string map.
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Reads `key`, applies `edit` and writes the result as one atomic step.
    ///
    /// No other writer can change `key` between the read and the write. If
    /// `edit` fails, nothing is written and its error is returned.
    fn update(&self, key: &str, edit: Edit<'_>) -> Result<()>;
}

/// Reads and decodes a JSON value stored under `key`.
///
/// Undecodable content is reported as [`Error::CorruptedData`].
pub fn load_json<T: DeserializeOwned>(kv: &dyn KvStore, key: &str) -> Result<Option<T>> {
    kv.get(key)?.map(|raw| decode(key, &raw)).transpose()
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn store_json<T: Serialize + ?Sized>(kv: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw)
}

/// Decodes a JSON value under `key`, applies `edit`, and stores the result
/// atomically. `edit` returning `None` leaves the slot untouched.
pub fn update_json<T, F>(kv: &dyn KvStore, key: &str, edit: F) -> Result<()>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(Option<T>) -> Result<Option<T>>,
{
    kv.update(
        key,
        Box::new(move |raw: Option<String>| {
            let current = raw.map(|raw| decode(key, &raw)).transpose()?;
            match edit(current)? {
                Some(next) => Ok(Some(serde_json::to_string(&next)?)),
                None => Ok(None),
            }
        }),
    )
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::CorruptedData {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// SQLite-backed [`KvStore`].
pub struct SqliteKv {
    conn: Mutex<Connection>,
}

impl SqliteKv {
    /// Opens (or creates) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA busy_timeout = 5000;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;",
        )?;
        conn.execute_batch(SCHEMA)?;

        Ok(SqliteKv {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteKv {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        f(&conn)
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row(SELECT_VALUE, params![key], |row| row.get(0))
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(UPSERT_VALUE, params![key, value, now])?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })
    }

    fn update(&self, key: &str, edit: Edit<'_>) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        // IMMEDIATE takes the write lock up front, so a second process waits
        // on busy_timeout instead of reading a value about to be replaced.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current = tx
            .query_row(SELECT_VALUE, params![key], |row| row.get(0))
            .optional()?;
        if let Some(value) = edit(current)? {
            let now = Utc::now().to_rfc3339();
            tx.execute(UPSERT_VALUE, params![key, value, now])?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// In-memory [`KvStore`] for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn update(&self, key: &str, edit: Edit<'_>) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        if let Some(value) = edit(entries.get(key).cloned())? {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
