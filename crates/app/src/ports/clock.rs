//! Clock port — the monotonic time source behind timers and polling.

use std::time::Instant;

/// Supplies a monotonically non-decreasing "now".
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
