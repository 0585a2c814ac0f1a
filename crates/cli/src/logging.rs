// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.
//!
//! Stdout carries command output only. The filter comes from `TJ_LOG`
//! (EnvFilter syntax) and otherwise defaults to `warn`, or `debug` with `-v`.

use tracing_subscriber::EnvFilter;

use crate::env;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = build_filter(env::log_filter().as_deref(), verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Filter from an explicit directive, falling back to the default level
/// when it is absent or does not parse.
pub(crate) fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

pub(crate) fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
