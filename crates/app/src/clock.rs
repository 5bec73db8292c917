//! System clock backed by [`Instant::now`].

use std::time::Instant;

use crate::ports::Clock;

/// Production [`Clock`] reading the operating system's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
