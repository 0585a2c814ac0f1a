// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::TripArgs;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse a `YYYY-MM-DD` calendar date, keeping it as text.
fn date_arg(s: &str) -> Result<String, String> {
    tj_core::parse_date(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Id,
}

#[derive(Parser)]
#[command(name = "tj")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first trip journal client")]
#[command(
    long_about = "Offline-first trip journal client.\n\n\
    Reads fall back to the last cached listing and changes are queued while the trip \
    server is unreachable. `tj sync` delivers the queue once it is back."
)]
pub struct Cli {
    /// Treat the trip server as unreachable (queue everything)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log debug detail to stderr (TJ_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the state directory and config.toml
    Init {
        /// Trip server base URL
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },

    /// List trips (cached listing when offline)
    List {
        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Create a trip, or queue it when offline
    #[command(after_help = "\
Examples:
  tj new \"Kyoto\" -d Japan --start 2024-04-01 --end 2024-04-10
  tj new \"Weekend\" --photo https://img.example/1.jpg --photo https://img.example/2.jpg
  tj new \"Lisbon\" -o id                 Print only the new trip's id")]
    New {
        #[command(flatten)]
        trip: TripArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete a trip, queue the delete when offline, or withdraw a pending trip
    #[command(arg_required_else_help = true)]
    Rm {
        /// Trip id (server id or local-…)
        id: String,
    },

    /// Deliver queued changes to the trip server
    Sync {
        /// Keep running and sync whenever the server comes back (Ctrl-C stops)
        #[arg(long)]
        watch: bool,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show queued changes awaiting delivery
    Queue {
        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Upload an image and print its URL (requires a connection)
    #[command(arg_required_else_help = true)]
    Upload {
        /// Image file to upload
        path: String,
    },

    /// Show connectivity, pending changes and cache age
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}
