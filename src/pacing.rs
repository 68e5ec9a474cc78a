//! Fixed-interval tick pacing.

use std::{thread::sleep, time::{Duration, Instant}};

/// Monotonic time source plus a way to wait on it.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        sleep(duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        FramePacer { interval }
    }

    /// Time left in the frame after `elapsed` of work, never negative.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Sleeps out whatever is left of the frame that began at `frame_start`.
    pub fn wait<C: Clock>(&self, clock: &C, frame_start: Instant) {
        let elapsed = clock.now().saturating_duration_since(frame_start);
        let remaining = self.remaining(elapsed);
        if remaining > Duration::ZERO {
            clock.sleep(remaining);
        }
    }
}
