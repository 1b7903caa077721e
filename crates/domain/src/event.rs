//! Wake event — an immutable record of a magic-packet delivery attempt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dashboard::EventRecord;
use crate::id::EventId;
use crate::time::{self, Timestamp};

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeStatus {
    /// The packet left the socket.
    Success,
    /// Sending failed.
    Failed,
}

impl WakeStatus {
    /// Stable lowercase name, as stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for WakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WakeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A status string that is neither `success` nor `failed`.
#[derive(Debug, thiserror::Error)]
#[error("unknown wake status {0:?}")]
pub struct UnknownStatus(pub String);

/// An immutable record of one wake attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeEvent {
    pub id: EventId,
    pub event_time: Timestamp,
    pub device_name: String,
    pub username: String,
    pub status: WakeStatus,
}

impl WakeEvent {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(
        device_name: impl Into<String>,
        username: impl Into<String>,
        status: WakeStatus,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_time: time::now(),
            device_name: device_name.into(),
            username: username.into(),
            status,
        }
    }

    /// Project into the stringly record shape the dashboard attribute
    /// contract carries.
    #[must_use]
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            event_time: self.event_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            device_name: self.device_name.clone(),
            username: self.username.clone(),
            status: self.status.as_str().to_string(),
        }
    }
}
