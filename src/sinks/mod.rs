//! Passive observers of the countdown
//!
//! Sinks receive fire-and-forget notifications from the coordinator and never
//! feed anything back into the timer. They are called synchronously on the
//! timer's timeline, so a slow sink delays the next tick.

pub mod overlay;
pub mod status;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crate::timer::Band;

pub use overlay::TracingOverlay;
pub use status::StatusIndicator;

/// One progress sample as seen by sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f64,
    pub band: Band,
    pub remaining: Duration,
}

impl ProgressUpdate {
    pub fn new(progress: f64, remaining: Duration) -> Self {
        Self {
            progress,
            band: Band::from_progress(progress),
            remaining,
        }
    }

    /// Remaining time rounded to whole seconds
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining.as_secs_f64().round() as u64
    }
}

/// Observer of timer transitions. Every method defaults to doing nothing.
pub trait TimerSink: Send {
    /// Continuous progress, including the terminal 0.0 sample
    fn on_progress(&mut self, _update: &ProgressUpdate) {}
    /// The band differs from the last one announced in this run
    fn on_band_changed(&mut self, _band: Band) {}
    /// First sample of a fresh run
    fn on_started(&mut self, _update: &ProgressUpdate) {}
    fn on_paused(&mut self, _remaining: Duration) {}
    fn on_resumed(&mut self, _remaining: Duration) {}
    /// The run reached zero
    fn on_complete(&mut self) {}
    /// The run was stopped explicitly
    fn on_stopped(&mut self) {}
}

/// Which notifications a sink is entitled to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Receives every notification, including continuous progress
    Visual,
    /// Receives transitions only, and only while sounds are enabled
    Audible,
}

/// "Sounds enabled" preference consulted before any audible notification
pub trait SoundPreference: Send + Sync {
    fn sounds_enabled(&self) -> bool;
}

/// Runtime sound preference shared between the coordinator and the API
#[derive(Debug, Clone, Default)]
pub struct SoundToggle {
    enabled: Arc<AtomicBool>,
}

impl SoundToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Flip the preference and return the new value
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }
}

impl SoundPreference for SoundToggle {
    fn sounds_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports_new_value() {
        let toggle = SoundToggle::new(false);
        let shared = toggle.clone();

        assert!(toggle.toggle());
        assert!(shared.sounds_enabled());
        assert!(!shared.toggle());
        assert!(!toggle.sounds_enabled());
    }

    #[test]
    fn progress_update_derives_band_and_rounds_seconds() {
        let update = ProgressUpdate::new(0.3, Duration::from_millis(17_600));
        assert_eq!(update.band, Band::Yellow);
        assert_eq!(update.remaining_seconds(), 18);
    }
}
