//! Controller-specific error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use shared::SharedError;
use std::net::SocketAddr;
use supervisor::SupervisorError;
use thiserror::Error;

use crate::types::ErrorResponse;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("HTTP server startup failed on {addr}: {source}")]
    ServerStartupFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ControllerError {
    /// HTTP status reported to callers for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Supervisor(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::InvalidBody { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;
