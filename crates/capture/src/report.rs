// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console reporting for capture progress and failures.
//!
//! Every outcome of a capture operation is reported here rather than
//! propagated, so a failed capture never ends the process. Color is only
//! used when the sink is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use parking_lot::Mutex;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Line-oriented console writer.
pub struct Reporter {
    sink: Box<dyn Write + Send>,
    color: bool,
}

impl Reporter {
    /// Create a reporter over an arbitrary sink.
    pub fn new(sink: impl Write + Send + 'static, color: bool) -> Self {
        Self {
            sink: Box::new(sink),
            color,
        }
    }

    /// Reporter writing to stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }

    /// Reporter writing to stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        let color = io::stderr().is_terminal();
        Self::new(io::stderr(), color)
    }

    /// Reporter that discards everything.
    pub fn silent() -> Self {
        Self::new(io::sink(), false)
    }

    /// Reporter writing into a shared in-memory buffer.
    pub fn buffered() -> (Self, ReportBuffer) {
        let buffer = ReportBuffer::default();
        (Self::new(buffer.clone(), false), buffer)
    }

    /// Plain progress line.
    pub fn info(&mut self, msg: impl Display) {
        self.line(None, "", msg);
    }

    /// Completed action.
    pub fn success(&mut self, msg: impl Display) {
        self.line(Some(GREEN), "", msg);
    }

    /// Recoverable problem, the operation continues.
    pub fn warning(&mut self, msg: impl Display) {
        self.line(Some(YELLOW), "Warning: ", msg);
    }

    /// Failed operation.
    pub fn error(&mut self, msg: impl Display) {
        self.line(Some(RED), "Error: ", msg);
    }

    /// Write text verbatim, without a trailing newline.
    pub fn raw(&mut self, text: &str) {
        let _ = self.sink.write_all(text.as_bytes());
        let _ = self.sink.flush();
    }

    fn line(&mut self, color: Option<&str>, prefix: &str, msg: impl Display) {
        let _ = match color {
            Some(code) if self.color => writeln!(self.sink, "{code}{prefix}{msg}{RESET}"),
            _ => writeln!(self.sink, "{prefix}{msg}"),
        };
        let _ = self.sink.flush();
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Shared byte buffer a [`Reporter`] can write into.
#[derive(Clone, Debug, Default)]
pub struct ReportBuffer(Arc<Mutex<Vec<u8>>>);

impl ReportBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Written lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for ReportBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
