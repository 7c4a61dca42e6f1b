// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture session.
//!
//! Owns the output directory and the list of files produced during one
//! invocation. Every capture operation reports its own outcome and never
//! fails the session: a capture either yields a path or it does not.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::backend::{Backend, BackendError};
use crate::clock::{Clock, SystemClock};
use crate::naming::{app_tag, unique_path, CaptureMode};
use crate::report::Reporter;
use crate::stage::{Confirm, Stage};
use crate::summary::{self, Summary, SummaryOptions};

const CONFIRM_PROMPT: &str =
    "   Set up the application as described, then press Enter to capture...";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("timed capture needs at least one capture (got {count})")]
    InvalidTimedArgs { count: u32 },
}

/// One capture invocation against an output directory.
pub struct CaptureSession<B = Box<dyn Backend>, C = SystemClock> {
    output_dir: PathBuf,
    app: String,
    app_tag: String,
    backend: B,
    clock: C,
    reporter: Reporter,
    captured: Vec<PathBuf>,
}

impl<B: Backend, C: Clock> CaptureSession<B, C> {
    /// Start a session, creating `output_dir` if it does not exist.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        app: impl Into<String>,
        backend: B,
        clock: C,
        reporter: Reporter,
    ) -> Result<Self, SessionError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| SessionError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        let app = app.into();
        tracing::debug!(dir = %output_dir.display(), backend = backend.name(), "session started");

        Ok(Self {
            app_tag: app_tag(&app),
            output_dir,
            app,
            backend,
            clock,
            reporter,
            captured: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Files produced so far, in capture order.
    pub fn captured(&self) -> &[PathBuf] {
        &self.captured
    }

    pub fn reporter(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    /// Capture the application window, falling back to an interactive
    /// selection when the window capture fails.
    pub fn capture_window(&mut self) -> Option<PathBuf> {
        self.reporter
            .info(format_args!("Capturing {} window...", self.app));

        let tag = self.app_tag.clone();
        match self.attempt(&tag, CaptureMode::Window) {
            Ok(path) => {
                self.reporter
                    .success(format_args!("Screenshot saved: {}", display_name(&path)));
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "window capture failed");
                self.reporter.warning(format_args!(
                    "Window capture failed ({e}), trying interactive selection..."
                ));
                self.capture_selection()
            }
        }
    }

    /// Capture a region the user selects.
    pub fn capture_selection(&mut self) -> Option<PathBuf> {
        self.reporter
            .info("Click and drag to select the area to capture...");
        self.capture_as(CaptureMode::Selection.tag(), CaptureMode::Selection)
    }

    /// Capture the whole screen.
    pub fn capture_fullscreen(&mut self) -> Option<PathBuf> {
        self.reporter.info("Capturing full screen...");
        self.capture_as(CaptureMode::Fullscreen.tag(), CaptureMode::Fullscreen)
    }

    /// Capture the window `count` times, sleeping `interval` between
    /// attempts. Returns the files produced by this batch.
    pub fn timed_capture(
        &mut self,
        interval: Duration,
        count: u32,
    ) -> Result<Vec<PathBuf>, SessionError> {
        if count == 0 {
            return Err(SessionError::InvalidTimedArgs { count });
        }

        self.reporter.info(format_args!(
            "Starting timed capture: {} screenshots every {} seconds",
            count,
            format_secs(interval)
        ));
        self.reporter
            .info(format_args!("Make sure {} is running and visible!", self.app));

        let mut produced = Vec::new();
        for i in 0..count {
            self.reporter
                .info(format_args!("\nCapture {} of {}", i + 1, count));
            if let Some(path) = self.capture_window() {
                produced.push(path);
            }

            if i + 1 < count {
                self.reporter
                    .info(format_args!("Waiting {} seconds...", format_secs(interval)));
                self.clock.sleep(interval);
            }
        }

        self.reporter.success(format_args!(
            "\nTimed capture complete! {} screenshots saved.",
            produced.len()
        ));
        Ok(produced)
    }

    /// Walk through `stages`, waiting for confirmation before each
    /// interactive capture. A failed stage is skipped; the sequence ends
    /// early only when confirmation input runs out.
    pub fn guided_sequence(
        &mut self,
        stages: &[Stage],
        confirm: &mut impl Confirm,
    ) -> Vec<PathBuf> {
        self.reporter.info("Guided Screenshot Sequence");
        self.reporter.info("==========================");
        self.reporter
            .info("This will help you capture different states of the application.");

        let mut produced = Vec::new();
        for stage in stages {
            self.reporter.info(format_args!(
                "\n{}: {}",
                stage.name.to_uppercase(),
                stage.instruction
            ));

            match confirm.confirm(CONFIRM_PROMPT) {
                Ok(true) => {}
                Ok(false) => {
                    self.reporter
                        .warning("No more input, ending the sequence early.");
                    break;
                }
                Err(e) => {
                    self.reporter
                        .error(format_args!("Failed to read confirmation: {e}"));
                    break;
                }
            }

            match self.attempt(&stage.name, CaptureMode::Selection) {
                Ok(path) => {
                    self.reporter
                        .success(format_args!("Captured: {}", display_name(&path)));
                    produced.push(path);
                }
                Err(e) => {
                    tracing::debug!(stage = %stage.name, error = %e, "stage skipped");
                    self.reporter
                        .error(format_args!("Skipped {}: {e}", stage.name));
                }
            }
        }

        self.reporter.success(format_args!(
            "\nSequence complete! {} screenshots saved.",
            produced.len()
        ));
        produced
    }

    /// Write the markdown summary for this session's output directory.
    pub fn generate_summary(&mut self, options: &SummaryOptions) -> Option<Summary> {
        match summary::generate(&self.output_dir, options) {
            Ok(summary) => {
                self.reporter.info(format_args!(
                    "Generated markdown for {} of {} screenshots",
                    summary.entries.len(),
                    summary.total
                ));
                self.reporter.success(format_args!(
                    "Markdown generated: {}",
                    summary.path.display()
                ));
                self.reporter.info("\nCopy this into your README.md:");
                self.reporter.info("=".repeat(40));
                self.reporter.raw(&summary.markdown);
                Some(summary)
            }
            Err(e) => {
                self.reporter.error(&e);
                None
            }
        }
    }

    /// Run one backend capture for `mode` into a fresh file tagged `tag`.
    fn attempt(&mut self, tag: &str, mode: CaptureMode) -> Result<PathBuf, BackendError> {
        let app = self.app.clone();
        self.shoot(tag, |backend, path| match mode {
            CaptureMode::Window => backend.capture_window(&app, path),
            CaptureMode::Selection => backend.capture_selection(path),
            CaptureMode::Fullscreen => backend.capture_fullscreen(path),
        })
    }

    fn capture_as(&mut self, tag: &str, mode: CaptureMode) -> Option<PathBuf> {
        match self.attempt(tag, mode) {
            Ok(path) => {
                self.reporter.success(format_args!(
                    "{} screenshot saved: {}",
                    capitalize(&mode.to_string()),
                    display_name(&path)
                ));
                Some(path)
            }
            Err(BackendError::Cancelled) => {
                self.reporter
                    .error(format_args!("{} capture cancelled", capitalize(&mode.to_string())));
                None
            }
            Err(e) => {
                self.reporter
                    .error(format_args!("{} capture failed: {e}", capitalize(&mode.to_string())));
                None
            }
        }
    }

    /// Name a new file with `tag`, run `capture` into it and record it.
    fn shoot<F>(&mut self, tag: &str, capture: F) -> Result<PathBuf, BackendError>
    where
        F: FnOnce(&B, &Path) -> Result<(), BackendError>,
    {
        let now = self.clock.now();
        let path = unique_path(&self.output_dir, tag, &now);
        tracing::debug!(path = %path.display(), "capturing");

        if let Err(e) = capture(&self.backend, &path) {
            // A failed capture must not leave a partial image behind.
            if path.exists() {
                if let Err(remove) = fs::remove_file(&path) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %remove,
                        "failed to remove partial capture"
                    );
                }
            }
            return Err(e);
        }
        self.captured.push(path.clone());
        Ok(path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Seconds without a trailing `.0` for whole values.
fn format_secs(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}", duration.as_secs())
    } else {
        format!("{secs}")
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
