//! Supervisor-specific error types

use thiserror::Error;

/// Message returned when a request carries no usable fake time
pub const MISSING_FAKE_TIME: &str = "No fake time provided";

/// Message returned when a fake time cannot be placed in an environment variable
pub const NUL_IN_FAKE_TIME: &str = "Fake time must not contain NUL bytes";

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("{details}")]
    InvalidRequest { details: String },

    #[error("Failed to launch managed process {program}: {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to terminate managed process {pid}: {reason}")]
    TerminationFailed { pid: u32, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SupervisorError {
    /// Request rejected because the fake time was missing or empty
    pub fn missing_fake_time() -> Self {
        Self::InvalidRequest {
            details: MISSING_FAKE_TIME.to_string(),
        }
    }

    /// Request rejected because the fake time holds a NUL byte
    pub fn nul_in_fake_time() -> Self {
        Self::InvalidRequest {
            details: NUL_IN_FAKE_TIME.to_string(),
        }
    }

    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::LaunchFailure {
            program: program.into(),
            source,
        }
    }

    pub fn termination(pid: u32, reason: impl Into<String>) -> Self {
        Self::TerminationFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Whether the error is the caller's fault rather than the supervisor's
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}

pub type SupervisorResult<T> = Result<T, SupervisorError>;
