// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Guided sequence stages and user confirmation.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use serde::Deserialize;

/// One named step of a guided capture sequence.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stage {
    /// File tag for the capture, e.g. `force_matrix`
    pub name: String,

    /// What the user should set up before confirming
    pub instruction: String,
}

impl Stage {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// Stages walked through when no stage list is configured.
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new("initial", "Initial state with default forces"),
        Stage::new(
            "interaction",
            "Mouse interaction (click and drag particles)",
        ),
        Stage::new("force_matrix", "Force Matrix panel open"),
        Stage::new(
            "visual_effects",
            "Visual Effects panel with trails enabled",
        ),
        Stage::new("chaos", "Random forces applied (chaos mode)"),
    ]
}

/// Blocks until the user is ready for the next capture.
pub trait Confirm {
    /// Show `prompt` and wait. Returns `false` when no more input will come.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<bool>,
{
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self(prompt)
    }
}

/// Confirmation by pressing Enter on a line-oriented input.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<StdinLock<'static>, Stdout> {
    /// Read confirmations from the terminal.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // Keep the next message off the prompt line.
            writeln!(self.output)?;
        }
        Ok(read > 0)
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
