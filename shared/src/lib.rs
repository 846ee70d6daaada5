//! Shared types for the fake-time control plane
//!
//! Contains the process identity used to tag log output, the tracing
//! setup, and the error type shared by the supervisor and the controller.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
