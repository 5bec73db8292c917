//! Time and timestamp helpers.
//!
//! Two clocks are in play: timer deadlines are monotonic [`Instant`]s handed
//! in by the caller, while event records carry a UTC [`Timestamp`].

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// UTC timestamp stamped on every event.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Time left until `deadline`, saturating at zero once it has passed.
#[must_use]
pub fn remaining(deadline: Instant, now: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}
