use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tick_timer::{create_router, preset::Preset, sinks::SoundToggle, AppState};

fn app() -> Router {
    let state = AppState::new(
        20560,
        "127.0.0.1".to_string(),
        Preset::defaults(),
        SoundToggle::new(false),
        None,
    );
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn start_in_seconds_reports_a_running_timer() {
    let app = app();

    let (status, body) = send(&app, "POST", "/start", Some(json!({ "seconds": 60 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 60);
    assert_eq!(body["timer"]["label"], "01:00");
    assert_eq!(body["timer"]["band"], "green");
}

#[tokio::test]
async fn start_in_minutes_and_from_presets() {
    let app = app();

    let (_, body) = send(&app, "POST", "/start", Some(json!({ "minutes": 2 }))).await;
    assert_eq!(body["timer"]["label"], "02:00");

    let (status, body) = send(&app, "POST", "/start", Some(json!({ "preset": "pomodoro" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining_seconds"], 1500);
    assert!(body["message"].as_str().unwrap().contains("Pomodoro"));
}

#[tokio::test]
async fn invalid_start_requests_are_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/start", Some(json!({ "seconds": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&app, "POST", "/start", Some(json!({ "seconds": -10 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/start", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("duration is required"));

    let (status, _) = send(&app, "POST", "/start", Some(json!({ "preset": "lunch" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["active"], false);
}

#[tokio::test]
async fn huge_duration_is_rejected_and_the_server_keeps_working() {
    let app = app();

    let (status, body) = send(&app, "POST", "/start", Some(json!({ "seconds": 1e19 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, body) = send(&app, "POST", "/start", Some(json!({ "seconds": 60 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    let (status, _) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn pause_resume_and_stop_round_trip() {
    let app = app();
    send(&app, "POST", "/start", Some(json!({ "seconds": 300 }))).await;

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["message"], "Countdown paused");

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["message"], "Nothing to pause");

    let (_, body) = send(&app, "POST", "/resume", None).await;
    assert_eq!(body["status"], "running");

    let (_, body) = send(&app, "POST", "/stop", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["label"], "00:00");

    let (_, body) = send(&app, "POST", "/stop", None).await;
    assert_eq!(body["message"], "No countdown running");

    let (_, body) = send(&app, "POST", "/resume", None).await;
    assert_eq!(body["message"], "Nothing to resume");
}

#[tokio::test]
async fn status_reports_totals_and_last_action() {
    let app = app();
    send(&app, "POST", "/start", Some(json!({ "seconds": 90 }))).await;

    let (status, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_seconds"], 90.0);
    assert_eq!(body["sounds_enabled"], false);
    assert_eq!(body["last_action"], "start");
    assert_eq!(body["port"], 20560);
}

#[tokio::test]
async fn sounds_toggle_and_presets_listing() {
    let app = app();

    let (_, body) = send(&app, "POST", "/sounds/toggle", None).await;
    assert_eq!(body["sounds_enabled"], true);
    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["sounds_enabled"], true);

    let (_, body) = send(&app, "GET", "/presets", None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Pomodoro", "Short Break", "Long Break"]);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
