//! HTTP control endpoint for the fake-time supervisor
//!
//! Thin axum shell around [`supervisor::Supervisor`]: `POST /set_time`
//! restarts the managed process under a new fake time, `GET /status` and
//! `GET /health` report on it.

pub mod cli;
pub mod error;
pub mod handlers;
pub mod server;
pub mod types;

// Re-export main types
pub use cli::Args;
pub use error::{ControllerError, ControllerResult};
pub use server::{shutdown_signal, ControlServer};
pub use types::{ErrorResponse, MessageResponse, SetTimeRequest};
