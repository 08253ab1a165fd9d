//! Time sources for the session loop.

use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    /// Monotonic seconds since an arbitrary epoch.
    fn now(&self) -> f64;

    /// Millisecond counter derived from `now`.
    fn millis(&self) -> u64 {
        (self.now() * 1000.0) as u64
    }
}

/// Wall clock backed by `Instant`; epoch is construction time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for replays and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Moves time forward; negative steps are ignored so the clock stays monotonic.
    pub fn advance(&self, secs: f64) {
        if secs > 0.0 {
            self.now.set(self.now.get() + secs);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
