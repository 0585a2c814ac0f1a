// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::OutputFormat;
use crate::display::format_trip_list;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

use super::print_json;

pub async fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    output: OutputFormat,
) -> Result<()> {
    let trips = engine.get_trips().await;
    match output {
        OutputFormat::Text => println!("{}", format_trip_list(&trips)),
        OutputFormat::Json => print_json(&trips)?,
        OutputFormat::Id => {
            for trip in &trips {
                println!("{}", trip.id);
            }
        }
    }
    Ok(())
}
