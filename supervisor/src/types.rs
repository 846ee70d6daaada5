//! Request, confirmation and status types exchanged with the supervisor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SupervisorError, SupervisorResult};

/// A fake time accepted by libfaketime (e.g. `2021-01-01 00:00:00` or `+2d`)
///
/// The grammar belongs to libfaketime; the only rules enforced here are that
/// the value is not empty and can be carried in an environment variable
/// (no NUL bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FakeTime(String);

impl FakeTime {
    /// Accept a raw request value, rejecting missing or empty input
    pub fn parse(raw: Option<&str>) -> SupervisorResult<Self> {
        match raw {
            Some(value) => Self::try_from(value.to_string()),
            None => Err(SupervisorError::missing_fake_time()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FakeTime {
    type Error = SupervisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(SupervisorError::missing_fake_time());
        }
        if value.contains('\0') {
            return Err(SupervisorError::nul_in_fake_time());
        }
        Ok(Self(value))
    }
}

impl From<FakeTime> for String {
    fn from(value: FakeTime) -> Self {
        value.0
    }
}

impl fmt::Display for FakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful launch or restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Fake time applied to the new process, `None` for an ambient-time launch
    pub fake_time: Option<FakeTime>,
    pub pid: u32,
}

impl Confirmation {
    /// Human readable confirmation echoed back to callers
    pub fn message(&self) -> String {
        match &self.fake_time {
            Some(fake_time) => format!("Fake time set to {fake_time}"),
            None => "Managed process started with ambient time".to_string(),
        }
    }
}

/// Read-only snapshot of the supervisor state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub fake_time: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Successful launches since the supervisor was created
    pub launches: u64,
}
