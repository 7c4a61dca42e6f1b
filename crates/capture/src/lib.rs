// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Screenshot capture for a running graphical application.
//!
//! This crate drives an OS screenshot program (see [`backend`]), names the
//! produced files by mode and timestamp, and renders a markdown summary of
//! the most recent captures.

pub mod backend;
pub mod clock;
pub mod naming;
pub mod report;
pub mod session;
pub mod stage;
pub mod summary;

pub use backend::{Backend, BackendError, BackendKind, Programs};
pub use clock::{Clock, FakeClock, SystemClock};
pub use naming::CaptureMode;
pub use report::{ReportBuffer, Reporter};
pub use session::{CaptureSession, SessionError};
pub use stage::{default_stages, Confirm, LineConfirm, Stage};
pub use summary::{Summary, SummaryError, SummaryOptions};
