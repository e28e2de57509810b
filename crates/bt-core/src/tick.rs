use std::time::Duration;

use crate::Clock;

/// Per-cycle context handed down the tree alongside the blackboard.
pub struct TickContext<'a> {
    pub cycle: u64,
    clock: &'a mut dyn Clock,
}

impl<'a> TickContext<'a> {
    pub fn new(cycle: u64, clock: &'a mut dyn Clock) -> Self {
        Self { cycle, clock }
    }

    pub fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.clock.sleep(duration);
        }
    }

    pub fn sleep_secs(&mut self, secs: u32) {
        self.sleep(Duration::from_secs(u64::from(secs)));
    }
}
