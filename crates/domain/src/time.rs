//! Time helpers.

use chrono::Utc;

/// Current Unix time in whole seconds, as sent to the device's time-sync
/// endpoint.
#[must_use]
pub fn epoch_secs() -> i64 {
    Utc::now().timestamp()
}
