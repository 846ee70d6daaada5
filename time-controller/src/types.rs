//! Request and response bodies of the control API

use serde::{Deserialize, Serialize};

/// Body of `POST /set_time`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetTimeRequest {
    #[serde(default)]
    pub fake_time: Option<String>,
}

/// Success body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Failure body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
