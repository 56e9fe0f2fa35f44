//! Overlay sink that renders progress into the log

use std::time::Duration;
use tracing::{debug, info};

use super::{ProgressUpdate, TimerSink};
use crate::timer::Band;

/// Stand-in for the on-screen progress bar: logs what the overlay would draw
#[derive(Debug, Default)]
pub struct TracingOverlay {
    visible: bool,
}

impl TracingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn hide(&mut self) {
        self.visible = false;
        debug!("Overlay reset and hidden");
    }
}

impl TimerSink for TracingOverlay {
    fn on_progress(&mut self, update: &ProgressUpdate) {
        debug!(
            "Overlay: {:>5.1}% [{}] {}s left",
            update.progress * 100.0,
            update.band,
            update.remaining_seconds()
        );
    }

    fn on_band_changed(&mut self, band: Band) {
        info!("Overlay color changed to {}", band);
    }

    fn on_started(&mut self, update: &ProgressUpdate) {
        self.visible = true;
        info!("Overlay shown for {}s countdown", update.remaining_seconds());
    }

    fn on_paused(&mut self, remaining: Duration) {
        info!("Overlay paused at {:.0}s", remaining.as_secs_f64());
    }

    fn on_resumed(&mut self, remaining: Duration) {
        info!("Overlay resumed at {:.0}s", remaining.as_secs_f64());
    }

    fn on_complete(&mut self) {
        self.hide();
    }

    fn on_stopped(&mut self) {
        self.hide();
    }
}
