// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

use crate::env;

/// Filter used when `APPSHOT_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Build the filter from `APPSHOT_LOG`, falling back to the default
/// directive when the variable is unset or does not parse.
pub fn filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// console output on stdout.
pub fn init(verbose: bool) {
    let filter = filter(env::log_filter().as_deref(), verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
