// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! appshot binary entry point.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use appshot::cli::Cli;
use appshot::{logging, run};
use appshot_capture::Reporter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(msg) => Cli::command().error(ErrorKind::ValueValidation, msg).exit(),
    };

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            Reporter::stderr().error(format_args!("cannot read current directory: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match run::run(&cli, mode, &cwd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Reporter::stderr().error(&e);
            ExitCode::FAILURE
        }
    }
}
