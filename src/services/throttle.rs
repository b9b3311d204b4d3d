//! Fixed-interval rate limiter for pointer and scroll updates

use std::time::{Duration, Instant};

/// One frame at 60 fps
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Leading-edge throttle: the first call passes, further calls are refused
/// until `interval` has elapsed since the last accepted one.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and starts a new interval) if a call may run at `now`
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}
