// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch of a parsed command line.

use std::path::Path;

use appshot_capture::{CaptureSession, LineConfirm, Reporter, SystemClock};

use crate::cli::{Cli, Mode};
use crate::config::{ConfigError, FileConfig, Settings};
use crate::env;

/// Run one invocation.
///
/// Capture and summary failures are reported on stdout and still count as a
/// successful run; only configuration problems are returned.
pub fn run(cli: &Cli, mode: Mode, cwd: &Path) -> Result<(), ConfigError> {
    let file = FileConfig::discover(cli.config.as_deref(), cwd)?;
    let settings = Settings::resolve(cli, file, cwd, env::var)?;
    tracing::debug!(?settings, ?mode, "resolved settings");

    let backend = settings.backend.build(&settings.programs);
    let mut session = match CaptureSession::new(
        &settings.output_dir,
        &settings.app,
        backend,
        SystemClock::new(),
        Reporter::stdout(),
    ) {
        Ok(session) => session,
        Err(e) => {
            Reporter::stdout().error(&e);
            return Ok(());
        }
    };

    let reporter = session.reporter();
    reporter.info(format_args!("{} Screenshot Tool", settings.app));
    reporter.info("=".repeat(40));
    reporter.info(format_args!(
        "Output directory: {}",
        settings.output_dir.display()
    ));
    reporter.info("");

    match mode {
        Mode::Window => {
            session.capture_window();
        }
        Mode::Selection => {
            session.capture_selection();
        }
        Mode::Fullscreen => {
            session.capture_fullscreen();
        }
        Mode::Timed { interval, count } => {
            if let Err(e) = session.timed_capture(interval, count) {
                session.reporter().error(&e);
            }
        }
        Mode::Sequence => {
            let mut confirm = LineConfirm::stdin();
            session.guided_sequence(&settings.stages, &mut confirm);
        }
        Mode::UpdateReadme => {
            session.generate_summary(&settings.summary);
        }
    }
    Ok(())
}
