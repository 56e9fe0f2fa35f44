//! Error types for timer operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the timer core and its host
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    /// Start was requested with a duration that is not a positive, finite number of seconds
    #[error("invalid duration {0}s: expected a positive number of seconds, at most one year")]
    InvalidDuration(f64),
    /// Start was requested without naming a duration at all
    #[error("a duration is required: give seconds, minutes or a preset")]
    MissingDuration,
    /// Start was requested with a preset name that is not configured
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    /// The shared timer state could not be locked
    #[error("timer state unavailable: {0}")]
    StatePoisoned(String),
}

impl TimerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TimerError::InvalidDuration(_) | TimerError::MissingDuration => {
                StatusCode::BAD_REQUEST
            }
            TimerError::UnknownPreset(_) => StatusCode::NOT_FOUND,
            TimerError::StatePoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TimerError {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "error",
            "message": self.to_string(),
            "timestamp": Utc::now(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
