use std::thread;
use std::time::{Duration, Instant};

/// Soft wall-clock budget, checked between attempts. An attempt in flight is
/// never interrupted, so a slow query can overrun by its own latency.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Deadline {
            end: Instant::now() + budget,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    pub fn remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }

    /// Sleep for `interval`, cut short at the deadline. Returns false when
    /// the deadline has passed and no further attempt should be made.
    pub fn pause(&self, interval: Duration) -> bool {
        if self.expired() {
            return false;
        }
        thread::sleep(interval.min(self.remaining()));
        !self.expired()
    }
}
