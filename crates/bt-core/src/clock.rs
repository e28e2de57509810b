//! Injectable time.
//!
//! Nodes that model work taking time ask the clock to wait instead of sleeping directly, so a
//! simulation can run in real time while tests run instantly.

use std::time::Duration;

pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the calling thread for the requested duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClock;

impl Clock for NullClock {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Records every request without waiting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualClock {
    pub elapsed: Duration,
    pub requests: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed = self.elapsed.saturating_add(duration);
        self.requests.push(duration);
    }
}
