// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Screenshot file naming.
//!
//! Files are named `<tag>_<YYYYMMDDHHMMSS>_<micros>.png`. The tag is the
//! capture mode (or the application tag for window captures, or a guided
//! stage name).
//!
//! The 14-digit date/time block alone only resolves seconds, so every name
//! also carries the 6-digit microsecond count. Two captures within one
//! second therefore get distinct names; a clash inside the same microsecond
//! falls back to a `-N` suffix.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Extension of every file written by a capture.
pub const IMAGE_EXTENSION: &str = "png";

/// Date/time part of the file timestamp (14 digits).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Tag used when an application name has no usable characters.
const FALLBACK_WINDOW_TAG: &str = "window";

/// Which screenshot behavior a capture invokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureMode {
    Window,
    Selection,
    Fullscreen,
}

impl CaptureMode {
    /// Fixed file tag for the mode. Window captures are tagged with the
    /// application instead, see [`app_tag`].
    pub fn tag(&self) -> &'static str {
        match self {
            CaptureMode::Window => FALLBACK_WINDOW_TAG,
            CaptureMode::Selection => "selection",
            CaptureMode::Fullscreen => "fullscreen",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CaptureMode::Window => "window",
            CaptureMode::Selection => "interactive selection",
            CaptureMode::Fullscreen => "full screen",
        };
        f.write_str(label)
    }
}

/// Convert an application name into a snake_case file tag.
///
/// `ParticleLife` becomes `particle_life`, `My App 2` becomes `my_app_2`.
pub fn app_tag(app: &str) -> String {
    let mut tag = String::with_capacity(app.len() + 4);
    let mut prev: Option<char> = None;

    for c in app.chars() {
        if c.is_alphanumeric() {
            let boundary = c.is_uppercase()
                && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            if boundary && !tag.ends_with('_') {
                tag.push('_');
            }
            tag.extend(c.to_lowercase());
        } else if !tag.is_empty() && !tag.ends_with('_') {
            tag.push('_');
        }
        prev = Some(c);
    }

    let trimmed = tag.trim_end_matches('_');
    if trimmed.is_empty() {
        FALLBACK_WINDOW_TAG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format the timestamp portion of a file name.
pub fn timestamp(now: &DateTime<Local>) -> String {
    // Leap seconds report up to 1_999_999 micros.
    let micros = now.timestamp_subsec_micros().min(999_999);
    format!("{}_{:06}", now.format(TIMESTAMP_FORMAT), micros)
}

/// File name for a capture taken at `now`. A non-zero `collision` adds the
/// `-N` suffix used when the plain name is taken.
pub fn file_name(tag: &str, now: &DateTime<Local>, collision: u32) -> String {
    match collision {
        0 => format!("{}_{}.{}", tag, timestamp(now), IMAGE_EXTENSION),
        n => format!("{}_{}-{}.{}", tag, timestamp(now), n, IMAGE_EXTENSION),
    }
}

/// Path in `dir` for a capture taken at `now` that does not collide with an
/// existing file. Collisions get a `-N` suffix before the extension.
pub fn unique_path(dir: &Path, tag: &str, now: &DateTime<Local>) -> PathBuf {
    let mut collision = 0u32;
    loop {
        let path = dir.join(file_name(tag, now, collision));
        if !path.exists() {
            return path;
        }
        collision += 1;
    }
}

/// Human-readable title from a file stem: underscores become spaces and
/// every word is title-cased. A letter following a non-letter starts a new
/// word, so `run_2x` becomes `Run 2X`.
pub fn humanize(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut prev_letter = false;

    for c in stem.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
