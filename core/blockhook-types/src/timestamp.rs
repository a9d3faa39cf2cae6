//! Wall-clock timestamps with millisecond precision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
///
/// Serialized as a bare integer so stored documents stay plain JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Returns the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Converts to a UTC datetime.
    pub fn to_datetime(&self) -> crate::Result<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
            .ok_or_else(|| crate::Error::InvalidTimestamp(format!("{} out of range", self.0)))
    }

    /// Returns a timestamp that is never earlier than `self`.
    ///
    /// Used for `modified_at` so repeated updates within the same millisecond
    /// still move forward.
    #[must_use]
    pub fn advance(&self) -> Self {
        let now = Utc::now().timestamp_millis();
        if now > self.0 { Self(now) } else { Self(self.0.saturating_add(1)) }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Ok(dt) => write!(f, "{}", dt.to_rfc3339()),
            Err(_) => write!(f, "{}ms", self.0),
        }
    }
}
