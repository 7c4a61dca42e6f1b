// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn verbose_switches_default_to_debug() {
    assert_eq!(default_directive(false), "warn");
    assert_eq!(default_directive(true), "debug");
}

#[test]
fn unset_uses_default() {
    assert_eq!(filter(None, false).to_string(), "warn");
    assert_eq!(filter(None, true).to_string(), "debug");
}

#[test]
fn directives_override_verbose() {
    assert_eq!(
        filter(Some("appshot_capture=trace"), true).to_string(),
        "appshot_capture=trace"
    );
}

#[test]
fn invalid_directives_fall_back() {
    assert_eq!(filter(Some("appshot=loud"), false).to_string(), "warn");
}
