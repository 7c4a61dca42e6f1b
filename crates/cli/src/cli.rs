// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use appshot_capture::BackendKind;
use clap::{Args, Parser, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  appshot                     # Capture the application window
  appshot --select            # Interactive selection
  appshot --timed 5 10        # 10 captures, 5 seconds apart
  appshot --sequence          # Guided sequence capture
  appshot --update-readme     # Generate README markdown";

/// Screenshot capture utility
#[derive(Parser, Debug, Clone)]
#[command(
    name = "appshot",
    version,
    about = "Capture screenshots of a running application",
    after_help = EXAMPLES
)]
pub struct Cli {
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Directory screenshots are written to
    #[arg(long, short = 'o', value_name = "DIR", env = "APPSHOT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name of the application whose window is captured
    #[arg(long, value_name = "NAME", env = "APPSHOT_APP")]
    pub app: Option<String>,

    /// Screenshot program family to drive
    #[arg(long, value_enum, env = "APPSHOT_BACKEND")]
    pub backend: Option<CliBackend>,

    /// TOML config file (default: ./appshot.toml when present)
    #[arg(long, value_name = "FILE", env = "APPSHOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log command invocations to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Capture modes. At most one may be given; none means window capture.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// Interactive selection capture
    #[arg(long)]
    pub select: bool,

    /// Capture entire screen
    #[arg(long)]
    pub fullscreen: bool,

    /// Timed capture: interval in seconds and number of captures
    #[arg(long, num_args = 2, value_names = ["INTERVAL", "COUNT"])]
    pub timed: Option<Vec<u64>>,

    /// Guided sequence capture
    #[arg(long)]
    pub sequence: bool,

    /// Generate README markdown for the newest screenshots
    #[arg(long)]
    pub update_readme: bool,
}

/// CLI-friendly backend enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliBackend {
    /// macOS screencapture
    Screencapture,
    /// Wayland grim + slurp
    Grim,
}

impl From<CliBackend> for BackendKind {
    fn from(backend: CliBackend) -> Self {
        match backend {
            CliBackend::Screencapture => BackendKind::Screencapture,
            CliBackend::Grim => BackendKind::Grim,
        }
    }
}

/// The operation selected on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Window,
    Selection,
    Fullscreen,
    Timed { interval: Duration, count: u32 },
    Sequence,
    UpdateReadme,
}

impl Cli {
    /// Resolve the selected mode, validating the timed capture arguments.
    pub fn mode(&self) -> Result<Mode, String> {
        let mode = &self.mode;
        if mode.select {
            Ok(Mode::Selection)
        } else if mode.fullscreen {
            Ok(Mode::Fullscreen)
        } else if let Some(ref timed) = mode.timed {
            timed_mode(timed)
        } else if mode.sequence {
            Ok(Mode::Sequence)
        } else if mode.update_readme {
            Ok(Mode::UpdateReadme)
        } else {
            Ok(Mode::Window)
        }
    }
}

fn timed_mode(values: &[u64]) -> Result<Mode, String> {
    let [interval, count] = values else {
        return Err("--timed takes exactly two values: INTERVAL COUNT".to_string());
    };
    if *count == 0 {
        return Err("--timed COUNT must be at least 1".to_string());
    }
    let count = u32::try_from(*count)
        .map_err(|_| format!("--timed COUNT must be at most {}", u32::MAX))?;
    Ok(Mode::Timed {
        interval: Duration::from_secs(*interval),
        count,
    })
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
