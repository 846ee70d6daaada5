//! Shared error types for the fake-time control plane

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid log filter: {message}")]
    InvalidLogFilter { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
