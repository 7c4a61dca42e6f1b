// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file loading and settings resolution.
//!
//! Precedence, highest first: CLI flag, environment variable, config file,
//! built-in default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use appshot_capture::naming::app_tag;
use appshot_capture::summary::{DEFAULT_FILE_NAME, DEFAULT_HEADING, DEFAULT_LIMIT};
use appshot_capture::{default_stages, BackendKind, Programs, Stage, SummaryOptions};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::env;

/// Application captured when none is configured
pub const DEFAULT_APP: &str = "ParticleLife";
/// Output directory, relative to the current directory
pub const DEFAULT_OUTPUT_DIR: &str = "ParticleLifeScreenshots";
/// Config file picked up from the current directory
pub const DEFAULT_CONFIG_FILE: &str = "appshot.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Contents of an `appshot.toml` file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Application whose window is captured
    #[serde(default)]
    pub app: Option<String>,

    /// Screenshot directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Screenshot program family
    #[serde(default)]
    pub backend: Option<BackendKind>,

    /// Program name/path overrides
    #[serde(default)]
    pub programs: ProgramsConfig,

    /// Markdown summary settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Guided sequence stages (default: the built-in list)
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// Program overrides, each falling back to the program's usual name
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramsConfig {
    #[serde(default)]
    pub screencapture: Option<String>,
    #[serde(default)]
    pub osascript: Option<String>,
    #[serde(default)]
    pub grim: Option<String>,
    #[serde(default)]
    pub slurp: Option<String>,
    #[serde(default)]
    pub hyprctl: Option<String>,
}

/// Summary overrides
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    /// File written next to the screenshot directory (default: "SCREENSHOTS.md")
    #[serde(default)]
    pub file_name: Option<String>,

    /// Maximum images listed (default: 6)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Section heading (default: "Screenshots")
    #[serde(default)]
    pub heading: Option<String>,
}

impl FileConfig {
    /// Parse config text; `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Load the explicitly requested file, or `appshot.toml` in `cwd` when it
    /// exists, or nothing.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(&cwd.join(path));
        }
        let implicit = cwd.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "using config file");
            Self::load(&implicit)
        } else {
            Ok(Self::default())
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub app: String,
    /// Absolute screenshot directory
    pub output_dir: PathBuf,
    pub backend: BackendKind,
    pub programs: Programs,
    pub summary: SummaryOptions,
    pub stages: Vec<Stage>,
}

impl Settings {
    /// Merge CLI arguments (which already include their environment
    /// variables), the config file and defaults. `lookup` reads the
    /// environment variables that have no CLI flag.
    pub fn resolve<F>(
        cli: &Cli,
        file: FileConfig,
        cwd: &Path,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = cli
            .app
            .clone()
            .or(file.app)
            .unwrap_or_else(|| DEFAULT_APP.to_string());
        if app.trim().is_empty() {
            return Err(ConfigError::Invalid("app name must not be empty".into()));
        }

        let output_dir = cli
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output_dir = cwd.join(output_dir);

        let backend = cli
            .backend
            .map(BackendKind::from)
            .or(file.backend)
            .unwrap_or_else(BackendKind::platform_default);

        let defaults = Programs::default();
        let pick = |var: &str, configured: Option<String>, default: String| {
            lookup(var).or(configured).unwrap_or(default)
        };
        let programs = Programs {
            screencapture: pick(
                env::APPSHOT_SCREENCAPTURE_BIN,
                file.programs.screencapture,
                defaults.screencapture,
            ),
            osascript: pick(
                env::APPSHOT_OSASCRIPT_BIN,
                file.programs.osascript,
                defaults.osascript,
            ),
            grim: pick(env::APPSHOT_GRIM_BIN, file.programs.grim, defaults.grim),
            slurp: pick(env::APPSHOT_SLURP_BIN, file.programs.slurp, defaults.slurp),
            hyprctl: pick(
                env::APPSHOT_HYPRCTL_BIN,
                file.programs.hyprctl,
                defaults.hyprctl,
            ),
        };

        let summary = SummaryOptions {
            file_name: file
                .summary
                .file_name
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            limit: file.summary.limit.unwrap_or(DEFAULT_LIMIT),
            heading: file
                .summary
                .heading
                .unwrap_or_else(|| DEFAULT_HEADING.to_string()),
        };
        if summary.limit == 0 {
            return Err(ConfigError::Invalid(
                "summary.limit must be at least 1".into(),
            ));
        }
        if summary.file_name.is_empty() || summary.file_name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "summary.file_name must be a plain file name, got '{}'",
                summary.file_name
            )));
        }

        let stages = if file.stages.is_empty() {
            default_stages()
        } else {
            file.stages
        };
        if let Some(stage) = stages.iter().find(|s| app_tag(&s.name) != s.name) {
            return Err(ConfigError::Invalid(format!(
                "stage name '{}' must be snake_case (letters, digits and underscores)",
                stage.name
            )));
        }

        Ok(Self {
            app,
            output_dir,
            backend,
            programs,
            summary,
            stages,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
