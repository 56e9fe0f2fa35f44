//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Body of `POST /start`; exactly one way of naming the duration is used,
/// checked in the order preset, seconds, minutes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    pub preset: Option<String>,
    pub seconds: Option<f64>,
    pub minutes: Option<f64>,
}

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response whose status reflects the timer snapshot
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        let status = if !timer.active {
            "idle"
        } else if timer.paused {
            "paused"
        } else {
            "running"
        };
        Self::new(status.to_string(), message, timer)
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub total_seconds: f64,
    pub sounds_enabled: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Response of the sound toggle endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundsResponse {
    pub sounds_enabled: bool,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
