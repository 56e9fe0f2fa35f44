//! Status indicator sink

use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

use super::{ProgressUpdate, TimerSink};
use crate::state::TimerState;

/// Publishes the remaining-time display on a watch channel
#[derive(Debug)]
pub struct StatusIndicator {
    current: TimerState,
    tx: watch::Sender<TimerState>,
}

impl StatusIndicator {
    /// Create the indicator together with a receiver for its snapshots
    pub fn new() -> (Self, watch::Receiver<TimerState>) {
        let (tx, rx) = watch::channel(TimerState::new());
        let indicator = Self {
            current: TimerState::new(),
            tx,
        };
        (indicator, rx)
    }

    fn publish(&self) {
        if let Err(e) = self.tx.send(self.current.clone()) {
            warn!("Failed to publish timer status: {}", e);
        }
    }
}

impl TimerSink for StatusIndicator {
    fn on_progress(&mut self, update: &ProgressUpdate) {
        self.current = TimerState::running(update);
        self.publish();
    }

    fn on_paused(&mut self, remaining: Duration) {
        self.current.pause(remaining);
        self.publish();
    }

    fn on_resumed(&mut self, remaining: Duration) {
        self.current.resume(remaining);
        self.publish();
    }

    fn on_complete(&mut self) {
        self.current = TimerState::new();
        self.publish();
    }

    fn on_stopped(&mut self) {
        self.current = TimerState::new();
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_progress_then_resets_on_stop() {
        let (mut indicator, rx) = StatusIndicator::new();

        indicator.on_progress(&ProgressUpdate::new(1.0, Duration::from_secs(300)));
        assert_eq!(rx.borrow().label, "05:00");
        assert!(rx.borrow().active);

        indicator.on_paused(Duration::from_secs(250));
        assert!(rx.borrow().paused);
        assert_eq!(rx.borrow().remaining_seconds, 250);

        indicator.on_stopped();
        assert_eq!(*rx.borrow(), TimerState::new());
    }
}
