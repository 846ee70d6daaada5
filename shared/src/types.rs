//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Fallback identity for code running without an initialised binary (tests, embedding)
static EMBEDDED: ProcessId = ProcessId::Embedded;

/// Identity of the component emitting log output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// The time-controller binary (HTTP shell + supervisor)
    Controller,
    /// Supervisor library used outside the controller binary
    #[default]
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the controller binary
    pub fn init_controller() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Controller)
    }

    /// Get the global process ID, falling back to `Embedded` when none was set
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&EMBEDDED)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessId::Controller => "controller",
            ProcessId::Embedded => "embedded",
        }
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::Controller.to_string(), "controller");
        assert_eq!(ProcessId::Embedded.to_string(), "embedded");
    }

    #[test]
    fn test_current_falls_back_to_embedded() {
        // Tests never call init_controller, so the fallback is observed
        assert_eq!(*ProcessId::current(), ProcessId::Embedded);
    }

    #[test]
    fn test_default_is_embedded() {
        assert_eq!(ProcessId::default(), ProcessId::Embedded);
    }
}
