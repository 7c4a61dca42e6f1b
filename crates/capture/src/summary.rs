// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown summary of the most recent captures.
//!
//! The summary is regenerated in full from the directory listing on every
//! run and written next to the screenshot directory, so image links are
//! relative to the file's own location.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::naming::{humanize, IMAGE_EXTENSION};

/// Summary file written by default.
pub const DEFAULT_FILE_NAME: &str = "SCREENSHOTS.md";

/// Maximum number of images listed by default.
pub const DEFAULT_LIMIT: usize = 6;

/// Section heading by default.
pub const DEFAULT_HEADING: &str = "Screenshots";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("screenshot directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("no screenshots found in {}", .0.display())]
    Empty(PathBuf),

    #[error("screenshot directory has no parent to write into: {}", .0.display())]
    NoParent(PathBuf),

    #[error("invalid screenshot pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where and how the summary is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryOptions {
    /// File name created in the screenshot directory's parent
    pub file_name: String,

    /// Maximum number of images listed
    pub limit: usize,

    /// Text of the `##` heading
    pub heading: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            limit: DEFAULT_LIMIT,
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}

/// One listed image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Humanized file stem
    pub title: String,

    /// Image path relative to the summary file, `/`-separated
    pub link: String,
}

/// A written summary.
#[derive(Clone, Debug)]
pub struct Summary {
    /// The markdown file that was written
    pub path: PathBuf,

    /// Its full contents
    pub markdown: String,

    /// Number of images found in the directory
    pub total: usize,

    /// Images listed, newest first
    pub entries: Vec<SummaryEntry>,
}

/// Images in `dir`, newest first. Equal modification times are ordered by
/// file name, descending, so the result is stable.
pub fn images_newest_first(dir: &Path) -> Result<Vec<PathBuf>, SummaryError> {
    if !dir.is_dir() {
        return Err(SummaryError::MissingDir(dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        IMAGE_EXTENSION
    );
    let mut images: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let modified = fs::metadata(&path).and_then(|m| {
            if m.is_file() {
                m.modified().map(Some)
            } else {
                Ok(None)
            }
        });
        match modified {
            Ok(Some(modified)) => images.push((modified, path)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping unreadable image"
                );
            }
        }
    }

    images.sort_by(|a, b| b.cmp(a));
    Ok(images.into_iter().map(|(_, path)| path).collect())
}

/// Build the summary entries for `images` living in `dir`.
pub fn entries(dir: &Path, images: &[PathBuf]) -> Vec<SummaryEntry> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    images
        .iter()
        .filter_map(|image| {
            let file = image.file_name()?.to_string_lossy().into_owned();
            let stem = image.file_stem()?.to_string_lossy().into_owned();
            let link = if dir_name.is_empty() {
                file
            } else {
                format!("{dir_name}/{file}")
            };
            Some(SummaryEntry {
                title: humanize(&stem),
                link,
            })
        })
        .collect()
}

/// Render the markdown document.
pub fn render(heading: &str, entries: &[SummaryEntry]) -> String {
    let mut markdown = format!("## {heading}\n\n");
    for entry in entries {
        markdown.push_str(&format!("### {}\n", entry.title));
        markdown.push_str(&format!("![{}]({})\n\n", entry.title, entry.link));
    }
    markdown
}

/// Scan `dir` and write the summary of its newest images.
///
/// Nothing is written when the directory is missing or holds no images.
pub fn generate(dir: &Path, options: &SummaryOptions) -> Result<Summary, SummaryError> {
    let images = images_newest_first(dir)?;
    if images.is_empty() {
        return Err(SummaryError::Empty(dir.to_path_buf()));
    }

    let parent = summary_parent(dir)?;
    let newest: Vec<PathBuf> = images.iter().take(options.limit).cloned().collect();
    let entries = entries(dir, &newest);
    let markdown = render(&options.heading, &entries);

    let path = parent.join(&options.file_name);
    fs::write(&path, &markdown)?;
    tracing::debug!(path = %path.display(), listed = entries.len(), "wrote summary");

    Ok(Summary {
        path,
        markdown,
        total: images.len(),
        entries,
    })
}

fn summary_parent(dir: &Path) -> Result<PathBuf, SummaryError> {
    match dir.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(SummaryError::NoParent(dir.to_path_buf())),
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
