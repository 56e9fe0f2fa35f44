//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::TimerState;
use crate::{
    error::TimerError,
    preset::{find_preset, Preset},
    services::CommandSoundPlayer,
    sinks::{SinkKind, SoundPreference, SoundToggle, StatusIndicator, TracingOverlay},
    timer::TimerCoordinator,
};

/// Main application state shared by the API handlers and the ticker task
pub struct AppState {
    /// The countdown and its sinks; every timer operation goes through this lock
    pub coordinator: Arc<Mutex<TimerCoordinator>>,
    /// Named durations available to start requests
    pub presets: Vec<Preset>,
    /// Runtime "sounds enabled" preference
    pub sounds: SoundToggle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Deadline of the next tick, watched by the ticker task
    pub schedule_tx: watch::Sender<Option<tokio::time::Instant>>,
    /// Keep the receiver alive to prevent channel closure
    pub _schedule_rx: watch::Receiver<Option<tokio::time::Instant>>,
    /// Snapshots published by the status indicator
    pub status_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create the state and wire the overlay, status indicator and optional sound player
    pub fn new(
        port: u16,
        host: String,
        presets: Vec<Preset>,
        sounds: SoundToggle,
        sound_player: Option<CommandSoundPlayer>,
    ) -> Self {
        let (status, status_rx) = StatusIndicator::new();
        let (schedule_tx, schedule_rx) = watch::channel(None);

        let mut coordinator = TimerCoordinator::new(Arc::new(sounds.clone()));
        coordinator
            .add_sink(SinkKind::Visual, TracingOverlay::new())
            .add_sink(SinkKind::Visual, status);
        if let Some(player) = sound_player {
            coordinator.add_sink(SinkKind::Audible, player);
        }

        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            presets,
            sounds,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            schedule_tx,
            _schedule_rx: schedule_rx,
            status_rx,
        }
    }

    /// Run an operation on the coordinator, then republish the tick schedule
    pub fn with_coordinator<T, F>(&self, action: Option<&str>, op: F) -> Result<T, TimerError>
    where
        F: FnOnce(&mut TimerCoordinator) -> T,
    {
        let mut coordinator = self.coordinator.lock()
            .map_err(|e| TimerError::StatePoisoned(e.to_string()))?;

        let result = op(&mut *coordinator);
        let next_tick = coordinator.next_tick_due();
        drop(coordinator); // Release the lock early

        if let Some(action) = action {
            self.record_action(action);
        }

        // Wake the ticker so it picks up the new deadline
        if let Err(e) = self.schedule_tx.send(next_tick) {
            warn!("Failed to publish tick schedule: {}", e);
        }

        Ok(result)
    }

    /// Start a countdown of the given length
    pub fn start(&self, duration: Duration) -> Result<TimerState, TimerError> {
        info!("Starting countdown for {}s", duration.as_secs_f64());
        self.with_coordinator(Some("start"), |c| c.start(duration))??;
        Ok(self.get_timer_state())
    }

    /// Start a countdown from a configured preset
    pub fn start_preset(&self, name: &str) -> Result<(Preset, TimerState), TimerError> {
        let preset = find_preset(&self.presets, name)
            .cloned()
            .ok_or_else(|| TimerError::UnknownPreset(name.to_string()))?;

        info!("Starting preset '{}'", preset.name);
        let duration = preset.duration()?;
        self.with_coordinator(Some("start"), |c| c.start(duration))??;
        Ok((preset, self.get_timer_state()))
    }

    /// Stop the countdown. Returns whether anything was running.
    pub fn stop(&self) -> Result<bool, TimerError> {
        self.with_coordinator(Some("stop"), |c| c.stop(false))
    }

    pub fn pause(&self) -> Result<bool, TimerError> {
        self.with_coordinator(Some("pause"), |c| c.pause())
    }

    pub fn resume(&self) -> Result<bool, TimerError> {
        self.with_coordinator(Some("resume"), |c| c.resume())
    }

    /// Advance the countdown (ticker task only)
    pub fn tick(&self) -> Result<(), TimerError> {
        self.with_coordinator(None, |c| c.tick())
    }

    /// Flip the sound preference and return the new value
    pub fn toggle_sounds(&self) -> bool {
        let enabled = self.sounds.toggle();
        info!("Sound cues {}", if enabled { "enabled" } else { "disabled" });
        self.record_action(if enabled { "sounds-on" } else { "sounds-off" });
        enabled
    }

    pub fn sounds_enabled(&self) -> bool {
        self.sounds.sounds_enabled()
    }

    /// Get what the status indicator currently shows
    pub fn get_timer_state(&self) -> TimerState {
        self.status_rx.borrow().clone()
    }

    /// Duration of the current run in seconds
    pub fn total_seconds(&self) -> Result<f64, TimerError> {
        self.coordinator.lock()
            .map(|c| c.total_time().as_secs_f64())
            .map_err(|e| TimerError::StatePoisoned(e.to_string()))
    }

    /// Subscribe to tick deadline changes
    pub fn subscribe_schedule(&self) -> watch::Receiver<Option<tokio::time::Instant>> {
        self.schedule_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
