// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::OutputFormat;
use crate::display::format_queue;
use crate::error::Result;
use crate::sync::{ConnectivityProbe, RemoteApi, SyncEngine};

use super::print_json;

pub fn run<A: RemoteApi, P: ConnectivityProbe>(
    engine: &SyncEngine<A, P>,
    output: OutputFormat,
) -> Result<()> {
    let actions = engine.pending()?;
    match output {
        OutputFormat::Text => println!("{}", format_queue(&actions)),
        OutputFormat::Json => print_json(&actions)?,
        OutputFormat::Id => {
            for action in &actions {
                println!("{}", action.id);
            }
        }
    }
    Ok(())
}
