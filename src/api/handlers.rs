//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use chrono::Utc;
use tracing::info;

use crate::{
    error::TimerError,
    preset::Preset,
    state::AppState,
    timer::duration_from_secs,
};
use super::responses::{
    ApiResponse, HealthResponse, SoundsResponse, StartRequest, StatusResponse,
};

/// Handle POST /start - Start a countdown, replacing any run in progress
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<ApiResponse>, TimerError> {
    if let Some(name) = request.preset.as_deref() {
        let (preset, timer) = state.start_preset(name)?;
        info!("Start endpoint called - preset '{}' started", preset.name);
        return Ok(Json(ApiResponse::from_timer(
            format!("Preset '{}' started", preset.name),
            timer,
        )));
    }

    let seconds = match (request.seconds, request.minutes) {
        (Some(seconds), _) => seconds,
        (None, Some(minutes)) => minutes * 60.0,
        (None, None) => return Err(TimerError::MissingDuration),
    };

    let duration = duration_from_secs(seconds)?;
    let timer = state.start(duration)?;
    info!("Start endpoint called - countdown started for {}s", seconds);
    Ok(Json(ApiResponse::from_timer(
        format!("Countdown started for {}", timer.label),
        timer,
    )))
}

/// Handle POST /stop - Stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, TimerError> {
    let message = if state.stop()? {
        info!("Stop endpoint called - countdown stopped");
        "Countdown stopped"
    } else {
        "No countdown running"
    };
    Ok(Json(ApiResponse::from_timer(message.to_string(), state.get_timer_state())))
}

/// Handle POST /pause - Pause the running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, TimerError> {
    let message = if state.pause()? {
        info!("Pause endpoint called - countdown paused");
        "Countdown paused"
    } else {
        "Nothing to pause"
    };
    Ok(Json(ApiResponse::from_timer(message.to_string(), state.get_timer_state())))
}

/// Handle POST /resume - Resume a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, TimerError> {
    let message = if state.resume()? {
        info!("Resume endpoint called - countdown resumed");
        "Countdown resumed"
    } else {
        "Nothing to resume"
    };
    Ok(Json(ApiResponse::from_timer(message.to_string(), state.get_timer_state())))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, TimerError> {
    let total_seconds = state.total_seconds()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.get_timer_state(),
        total_seconds,
        sounds_enabled: state.sounds_enabled(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /presets - List configured presets
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Preset>> {
    Json(state.presets.clone())
}

/// Handle POST /sounds/toggle - Flip the sound preference
pub async fn toggle_sounds_handler(State(state): State<Arc<AppState>>) -> Json<SoundsResponse> {
    Json(SoundsResponse {
        sounds_enabled: state.toggle_sounds(),
        timestamp: Utc::now(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
