// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic testing.
//!
//! Capture sessions read the wall clock to name files and sleep between
//! timed captures. `FakeClock` lets tests control both without real delays.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use parking_lot::Mutex;

/// Clock trait for time abstraction
pub trait Clock {
    /// Current local time
    fn now(&self) -> DateTime<Local>;

    /// Block the current thread for a duration
    fn sleep(&self, duration: Duration);
}

/// Real clock using system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fake clock for testing with controllable time.
///
/// Clones share the same time and sleep log, so a test can keep a handle
/// after moving the clock into a session.
#[derive(Clone, Debug)]
pub struct FakeClock {
    /// Current time in microseconds since the Unix epoch
    current_micros: Arc<AtomicI64>,

    /// Amount added after every `now()` call
    tick_micros: i64,

    /// Every duration passed to `sleep`, in call order
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl FakeClock {
    /// Create a fake clock frozen at a given time
    pub fn new(start_micros: i64) -> Self {
        Self {
            current_micros: Arc::new(AtomicI64::new(start_micros)),
            tick_micros: 0,
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a fake clock starting at a given date/time
    pub fn at(start: DateTime<Local>) -> Self {
        Self::new(start.timestamp_micros())
    }

    /// Create a fake clock starting at "now"
    pub fn at_now() -> Self {
        Self::at(Local::now())
    }

    /// Advance time by `tick` after every read
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick_micros = duration_micros(tick);
        self
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        self.current_micros
            .fetch_add(duration_micros(duration), Ordering::SeqCst);
    }

    /// Durations passed to `sleep` so far
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Number of `sleep` calls so far
    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().len()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::at_now()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Local> {
        let micros = self
            .current_micros
            .fetch_add(self.tick_micros, Ordering::SeqCst);
        DateTime::<Utc>::from_timestamp_micros(micros)
            .unwrap_or_default()
            .with_timezone(&Local)
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        self.advance(duration);
    }
}

fn duration_micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
