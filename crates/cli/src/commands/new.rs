// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tj_core::TripInput;

use crate::cli::OutputFormat;
use crate::display::format_created;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

use super::print_json;

pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    input: TripInput,
    output: OutputFormat,
) -> Result<()> {
    let trip = engine.create_trip(input).await?;
    match output {
        OutputFormat::Text => println!("{}", format_created(&trip)),
        OutputFormat::Json => print_json(&trip)?,
        OutputFormat::Id => println!("{}", trip.id),
    }
    Ok(())
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
