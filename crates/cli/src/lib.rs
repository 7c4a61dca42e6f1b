// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! appshot
//!
//! Captures screenshots of a running application through the platform's
//! screenshot programs and keeps a markdown gallery of the newest ones.
//! The capture logic lives in [`appshot_capture`]; this crate holds the
//! command line, configuration and logging around it.

pub mod cli;
pub mod config;
pub mod env;
pub mod logging;
pub mod run;
