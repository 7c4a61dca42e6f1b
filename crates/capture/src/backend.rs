// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Platform screenshot programs.
//!
//! A [`Backend`] turns a capture request into one or more external process
//! invocations. The exit status of the screenshot program is the only
//! feedback signal, plus the presence of the output file for interactive
//! selections (which exit successfully when the user presses Escape).

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{program} not found; is it installed and on PATH?")]
    NotFound { program: String },

    #[error("{program} failed ({status}){}", stderr_suffix(.stderr))]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("capture cancelled")]
    Cancelled,

    #[error("no window found for {0}")]
    WindowNotFound(String),

    #[error("unexpected output from {program}: {detail}")]
    InvalidOutput { program: String, detail: String },

    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Capability interface over a platform screenshot program.
pub trait Backend {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Capture the window of the application named `app` into `path`.
    fn capture_window(&self, app: &str, path: &Path) -> Result<(), BackendError>;

    /// Let the user select a region interactively and capture it into `path`.
    fn capture_selection(&self, path: &Path) -> Result<(), BackendError>;

    /// Capture the whole screen into `path`.
    fn capture_fullscreen(&self, path: &Path) -> Result<(), BackendError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn capture_window(&self, app: &str, path: &Path) -> Result<(), BackendError> {
        (**self).capture_window(app, path)
    }

    fn capture_selection(&self, path: &Path) -> Result<(), BackendError> {
        (**self).capture_selection(path)
    }

    fn capture_fullscreen(&self, path: &Path) -> Result<(), BackendError> {
        (**self).capture_fullscreen(path)
    }
}

/// Which family of screenshot programs to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// macOS `screencapture` + `osascript`
    Screencapture,
    /// Wayland `grim` + `slurp`, window lookup through `hyprctl`
    Grim,
}

impl BackendKind {
    /// Backend for the platform this binary was built for.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            BackendKind::Screencapture
        } else {
            BackendKind::Grim
        }
    }

    /// Build the backend using the given program names.
    pub fn build(self, programs: &Programs) -> Box<dyn Backend> {
        match self {
            BackendKind::Screencapture => Box::new(Screencapture::new(programs)),
            BackendKind::Grim => Box::new(Grim::new(programs)),
        }
    }
}

/// Program names (or paths) the backends invoke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Programs {
    pub screencapture: String,
    pub osascript: String,
    pub grim: String,
    pub slurp: String,
    pub hyprctl: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            screencapture: "screencapture".to_string(),
            osascript: "osascript".to_string(),
            grim: "grim".to_string(),
            slurp: "slurp".to_string(),
            hyprctl: "hyprctl".to_string(),
        }
    }
}

/// Run a program to completion, mapping spawn failures and non-zero exits.
fn run<I, S>(program: &str, args: I) -> Result<Output, BackendError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    tracing::debug!(?command, "running screenshot command");

    let output = command.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BackendError::NotFound {
            program: program.to_string(),
        },
        _ => BackendError::Io {
            program: program.to_string(),
            source: e,
        },
    })?;

    if !output.status.success() {
        return Err(BackendError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// A successful exit without an output file means the user backed out.
fn ensure_written(path: &Path) -> Result<(), BackendError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BackendError::Cancelled)
    }
}

fn stdout_text(program: &str, output: &Output) -> Result<String, BackendError> {
    String::from_utf8(output.stdout.clone())
        .map(|s| s.trim().to_string())
        .map_err(|e| BackendError::InvalidOutput {
            program: program.to_string(),
            detail: e.to_string(),
        })
}

/// Screen rectangle in global coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    /// `x,y,w,h` as accepted by `screencapture -R`.
    pub fn to_screencapture(&self) -> String {
        format!("{},{},{},{}", self.x, self.y, self.width, self.height)
    }

    /// `x,y wxh` as accepted by `grim -g`.
    pub fn to_grim(&self) -> String {
        format!("{},{} {}x{}", self.x, self.y, self.width, self.height)
    }

    fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// =============================================================================
// macOS
// =============================================================================

/// macOS backend built on `screencapture`.
///
/// The window rectangle is looked up through System Events, since
/// `screencapture -l` wants a CGWindowID that AppleScript cannot report.
#[derive(Clone, Debug)]
pub struct Screencapture {
    screencapture: String,
    osascript: String,
}

impl Screencapture {
    pub fn new(programs: &Programs) -> Self {
        Self {
            screencapture: programs.screencapture.clone(),
            osascript: programs.osascript.clone(),
        }
    }

    fn window_rect(&self, app: &str) -> Result<Rect, BackendError> {
        let script = format!(
            "tell application \"System Events\" to tell (first process whose name contains \"{}\") \
             to get {{position, size}} of front window",
            applescript_escape(app)
        );
        let output = match run(&self.osascript, ["-e", script.as_str()]) {
            Ok(output) => output,
            Err(BackendError::Failed { .. }) => {
                return Err(BackendError::WindowNotFound(app.to_string()))
            }
            Err(e) => return Err(e),
        };
        let text = stdout_text(&self.osascript, &output)?;
        let rect = parse_applescript_rect(&text).ok_or_else(|| BackendError::InvalidOutput {
            program: self.osascript.clone(),
            detail: format!("expected 'x, y, width, height', got '{text}'"),
        })?;
        if rect.is_empty() {
            return Err(BackendError::WindowNotFound(app.to_string()));
        }
        Ok(rect)
    }
}

impl Backend for Screencapture {
    fn name(&self) -> &'static str {
        "screencapture"
    }

    fn capture_window(&self, app: &str, path: &Path) -> Result<(), BackendError> {
        let rect = self.window_rect(app)?;
        tracing::debug!(app, ?rect, "found window");
        let region = rect.to_screencapture();
        run(
            &self.screencapture,
            [OsStr::new("-x"), OsStr::new("-R"), OsStr::new(&region), path.as_os_str()],
        )?;
        ensure_written(path)
    }

    fn capture_selection(&self, path: &Path) -> Result<(), BackendError> {
        run(&self.screencapture, [OsStr::new("-i"), path.as_os_str()])?;
        ensure_written(path)
    }

    fn capture_fullscreen(&self, path: &Path) -> Result<(), BackendError> {
        run(&self.screencapture, [OsStr::new("-x"), path.as_os_str()])?;
        ensure_written(path)
    }
}

fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parse System Events' flattened `{{x, y}, {w, h}}` reply: `x, y, w, h`.
pub fn parse_applescript_rect(text: &str) -> Option<Rect> {
    let values: Vec<i64> = text
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [x, y, width, height] => Some(Rect {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

// =============================================================================
// Wayland
// =============================================================================

/// Wayland backend built on `grim` and `slurp`.
///
/// Window lookup asks Hyprland for its client list and picks the first
/// client whose class or title contains the application name.
#[derive(Clone, Debug)]
pub struct Grim {
    grim: String,
    slurp: String,
    hyprctl: String,
}

impl Grim {
    pub fn new(programs: &Programs) -> Self {
        Self {
            grim: programs.grim.clone(),
            slurp: programs.slurp.clone(),
            hyprctl: programs.hyprctl.clone(),
        }
    }

    fn window_rect(&self, app: &str) -> Result<Rect, BackendError> {
        let output = run(&self.hyprctl, ["clients", "-j"])?;
        let text = stdout_text(&self.hyprctl, &output)?;
        find_client_rect(&text, app)
            .map_err(|detail| BackendError::InvalidOutput {
                program: self.hyprctl.clone(),
                detail,
            })?
            .ok_or_else(|| BackendError::WindowNotFound(app.to_string()))
    }

    fn shoot(&self, geometry: Option<&str>, path: &Path) -> Result<(), BackendError> {
        let mut args: Vec<&OsStr> = Vec::with_capacity(3);
        if let Some(geometry) = geometry {
            args.push(OsStr::new("-g"));
            args.push(OsStr::new(geometry));
        }
        args.push(path.as_os_str());
        run(&self.grim, args)?;
        ensure_written(path)
    }
}

impl Backend for Grim {
    fn name(&self) -> &'static str {
        "grim"
    }

    fn capture_window(&self, app: &str, path: &Path) -> Result<(), BackendError> {
        let rect = self.window_rect(app)?;
        tracing::debug!(app, ?rect, "found window");
        self.shoot(Some(&rect.to_grim()), path)
    }

    fn capture_selection(&self, path: &Path) -> Result<(), BackendError> {
        // slurp exits non-zero when the selection is aborted
        let output = match run(&self.slurp, ["-f", "%x,%y %wx%h"]) {
            Ok(output) => output,
            Err(BackendError::Failed { .. }) => return Err(BackendError::Cancelled),
            Err(e) => return Err(e),
        };
        let geometry = stdout_text(&self.slurp, &output)?;
        if geometry.is_empty() {
            return Err(BackendError::Cancelled);
        }
        self.shoot(Some(&geometry), path)
    }

    fn capture_fullscreen(&self, path: &Path) -> Result<(), BackendError> {
        self.shoot(None, path)
    }
}

/// Find the first Hyprland client matching `app` in `hyprctl clients -j`
/// output. Matching is case-insensitive on class and title.
pub fn find_client_rect(json: &str, app: &str) -> Result<Option<Rect>, String> {
    let clients: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| format!("invalid client list: {e}"))?;
    let needle = app.to_lowercase();

    for client in &clients {
        let matches = ["class", "title", "initialClass", "initialTitle"]
            .iter()
            .filter_map(|key| client.get(key).and_then(|v| v.as_str()))
            .any(|value| value.to_lowercase().contains(&needle));
        if !matches {
            continue;
        }

        let pair = |key: &str| -> Option<(i64, i64)> {
            let values = client.get(key)?.as_array()?;
            Some((values.first()?.as_i64()?, values.get(1)?.as_i64()?))
        };
        let (Some((x, y)), Some((width, height))) = (pair("at"), pair("size")) else {
            return Err("client entry is missing 'at' or 'size'".to_string());
        };
        let rect = Rect {
            x,
            y,
            width,
            height,
        };
        if !rect.is_empty() {
            return Ok(Some(rect));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
