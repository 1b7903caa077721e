//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for wake events and anything else time-stamped.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
