//! Timer state snapshot shown by the status indicator

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{sinks::ProgressUpdate, timer::Band};

/// What the status indicator currently displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub active: bool,
    pub paused: bool,
    pub remaining_seconds: u64,
    pub progress: f64,
    pub band: Option<Band>,
    /// Remaining time as `MM:SS`
    pub label: String,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            active: false,
            paused: false,
            remaining_seconds: 0,
            progress: 0.0,
            band: None,
            label: format_remaining(0),
        }
    }

    /// Create a counting-down state from a progress sample
    pub fn running(update: &ProgressUpdate) -> Self {
        let remaining_seconds = update.remaining_seconds();
        Self {
            active: true,
            paused: false,
            remaining_seconds,
            progress: update.progress,
            band: Some(update.band),
            label: format_remaining(remaining_seconds),
        }
    }

    /// Mark the state paused with the remaining time frozen
    pub fn pause(&mut self, remaining: Duration) {
        self.paused = true;
        self.set_remaining(remaining);
    }

    pub fn resume(&mut self, remaining: Duration) {
        self.paused = false;
        self.set_remaining(remaining);
    }

    /// Check if a countdown is showing
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn set_remaining(&mut self, remaining: Duration) {
        self.remaining_seconds = remaining.as_secs_f64().round() as u64;
        self.label = format_remaining(self.remaining_seconds);
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format whole seconds as `MM:SS`; minutes are not wrapped into hours
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
