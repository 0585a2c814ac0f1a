// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::error::{Error, Result};
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    path: &Path,
) -> Result<()> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let url = engine.upload_image(path).await?;
    println!("{}", url);
    Ok(())
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
