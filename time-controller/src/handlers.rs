//! REST API handlers
//!
//! Handlers are generic over [`TimeControl`] so they can be exercised with
//! `MockTimeControl` as well as the real supervisor.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use shared::{process_info, ProcessId};
use supervisor::{FakeTime, SupervisorStatus, TimeControl};

use crate::error::{ControllerError, ControllerResult};
use crate::types::{MessageResponse, SetTimeRequest};

/// Restart the managed process under a new fake time - `POST /set_time`
pub async fn set_time<T>(
    State(control): State<Arc<T>>,
    payload: Result<Json<SetTimeRequest>, JsonRejection>,
) -> ControllerResult<Json<MessageResponse>>
where
    T: TimeControl + 'static,
{
    let Json(request) = payload.map_err(|rejection| ControllerError::InvalidBody {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    // Rejected here so an invalid request never reaches the supervisor
    let fake_time = FakeTime::parse(request.fake_time.as_deref())?;
    process_info!(ProcessId::current(), "⏰ Fake time requested: {}", fake_time);

    let confirmation = control.restart_with(Some(fake_time.into())).await?;

    Ok(Json(MessageResponse {
        message: confirmation.message(),
    }))
}

/// Report the managed process - `GET /status`
pub async fn status<T>(State(control): State<Arc<T>>) -> Json<SupervisorStatus>
where
    T: TimeControl + 'static,
{
    Json(control.status().await)
}

/// Liveness of the control endpoint itself - `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
