// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Variables backing CLI flags are read by clap (see [`crate::cli`]); the
//! rest are defined and read here.

/// `APPSHOT_OUTPUT_DIR`, same as `--output-dir`.
pub const APPSHOT_OUTPUT_DIR: &str = "APPSHOT_OUTPUT_DIR";
/// `APPSHOT_APP`, same as `--app`.
pub const APPSHOT_APP: &str = "APPSHOT_APP";
/// `APPSHOT_BACKEND`, same as `--backend`.
pub const APPSHOT_BACKEND: &str = "APPSHOT_BACKEND";
/// `APPSHOT_CONFIG`, same as `--config`.
pub const APPSHOT_CONFIG: &str = "APPSHOT_CONFIG";
/// `APPSHOT_LOG`, tracing filter directives.
pub const APPSHOT_LOG: &str = "APPSHOT_LOG";

pub const APPSHOT_SCREENCAPTURE_BIN: &str = "APPSHOT_SCREENCAPTURE_BIN";
pub const APPSHOT_OSASCRIPT_BIN: &str = "APPSHOT_OSASCRIPT_BIN";
pub const APPSHOT_GRIM_BIN: &str = "APPSHOT_GRIM_BIN";
pub const APPSHOT_SLURP_BIN: &str = "APPSHOT_SLURP_BIN";
pub const APPSHOT_HYPRCTL_BIN: &str = "APPSHOT_HYPRCTL_BIN";

/// Read a variable, treating an empty value as unset.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `APPSHOT_LOG`, tracing filter, e.g. `appshot_capture=debug`.
pub fn log_filter() -> Option<String> {
    var(APPSHOT_LOG)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
