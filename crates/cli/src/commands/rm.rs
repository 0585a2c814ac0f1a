// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::display::format_deleted;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    id: &str,
) -> Result<()> {
    let outcome = engine.delete_trip(id).await?;
    println!("{}", format_deleted(id, &outcome));
    Ok(())
}

#[cfg(test)]
#[path = "rm_tests.rs"]
mod tests;
