//! Countdown engine
//!
//! Remaining time is always derived from an end anchor (`end_anchor - now`)
//! rather than decremented per tick, so jitter in the host scheduler never
//! accumulates. Pausing records the pause instant; resuming shifts the anchor
//! forward by the time spent paused.
//!
//! Every operation returns the events it raised, in order. The engine keeps no
//! callbacks of its own; the coordinator dispatches the returned events.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::clock::{Clock, TokioClock};
use crate::error::TimerError;

/// Period of the countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest countdown accepted: one year
pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Events raised by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Progress sample; `progress` is remaining / total in [0, 1]
    Update { progress: f64, remaining: Duration },
    /// The run reached zero by ticking
    Completed,
    /// The run was ended by an explicit stop
    Stopped,
    Paused { remaining: Duration },
    Resumed { remaining: Duration },
}

impl EngineEvent {
    /// Whether this event ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineEvent::Completed | EngineEvent::Stopped)
    }
}

/// Single countdown, reused across runs
#[derive(Debug)]
pub struct TimerEngine<C: Clock = TokioClock> {
    clock: C,
    total: Duration,
    remaining: Duration,
    end_anchor: Option<Instant>,
    paused_at: Option<Instant>,
    active: bool,
    /// Set once the terminal event of the current run has been raised
    finished: bool,
    /// Deadline of the next scheduled tick; `None` means nothing is scheduled
    next_tick: Option<Instant>,
}

impl TimerEngine<TokioClock> {
    pub fn new() -> Self {
        Self::with_clock(TokioClock)
    }
}

impl Default for TimerEngine<TokioClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            total: Duration::ZERO,
            remaining: Duration::ZERO,
            end_anchor: None,
            paused_at: None,
            active: false,
            finished: false,
            next_tick: None,
        }
    }

    /// Start a new run. An active run is stopped first and its events are
    /// returned ahead of the new run's first update.
    pub fn start(&mut self, duration: Duration) -> Result<Vec<EngineEvent>, TimerError> {
        self.validate(duration)?;

        let mut events = self.stop();
        let now = self.clock.now();
        let end_anchor = now
            .checked_add(duration)
            .ok_or(TimerError::InvalidDuration(duration.as_secs_f64()))?;

        self.total = duration;
        self.remaining = duration;
        self.end_anchor = Some(end_anchor);
        self.paused_at = None;
        self.active = true;
        self.finished = false;
        self.next_tick = Some(now + TICK_INTERVAL);

        info!("Countdown started for {:.0}s", duration.as_secs_f64());
        events.push(EngineEvent::Update {
            progress: 1.0,
            remaining: duration,
        });
        Ok(events)
    }

    /// Check that `start(duration)` would be accepted, without touching state
    pub fn validate(&self, duration: Duration) -> Result<(), TimerError> {
        if duration.is_zero() || duration > MAX_DURATION {
            return Err(TimerError::InvalidDuration(duration.as_secs_f64()));
        }
        if self.clock.now().checked_add(duration).is_none() {
            return Err(TimerError::InvalidDuration(duration.as_secs_f64()));
        }
        Ok(())
    }

    /// Recompute remaining time from the anchor. No-op while idle or paused.
    pub fn tick(&mut self) -> Vec<EngineEvent> {
        if !self.active || self.is_paused() {
            return Vec::new();
        }
        let Some(end_anchor) = self.end_anchor else {
            return Vec::new();
        };

        let now = self.clock.now();
        self.remaining = end_anchor.saturating_duration_since(now);

        if self.remaining.is_zero() {
            self.active = false;
            self.next_tick = None;
            info!("Countdown completed");
            return self.finish(EngineEvent::Completed);
        }

        self.next_tick = Some(next_deadline(self.next_tick, now));
        let progress = self.progress();
        debug!(
            "Tick: {:.1}s remaining ({:.3})",
            self.remaining.as_secs_f64(),
            progress
        );
        vec![EngineEvent::Update {
            progress,
            remaining: self.remaining,
        }]
    }

    /// End the active run. Idempotent.
    pub fn stop(&mut self) -> Vec<EngineEvent> {
        if !self.active {
            return Vec::new();
        }

        self.next_tick = None;
        self.remaining = Duration::ZERO;
        self.total = Duration::ZERO;
        self.end_anchor = None;
        self.paused_at = None;
        self.active = false;

        info!("Countdown stopped");
        self.finish(EngineEvent::Stopped)
    }

    pub fn pause(&mut self) -> Vec<EngineEvent> {
        if !self.active || self.is_paused() {
            return Vec::new();
        }
        let Some(end_anchor) = self.end_anchor else {
            return Vec::new();
        };

        let now = self.clock.now();
        self.remaining = end_anchor.saturating_duration_since(now);
        if self.remaining.is_zero() {
            // the next tick completes the run
            return Vec::new();
        }

        self.paused_at = Some(now);
        self.next_tick = None;

        info!("Countdown paused with {:.1}s remaining", self.remaining.as_secs_f64());
        vec![EngineEvent::Paused {
            remaining: self.remaining,
        }]
    }

    pub fn resume(&mut self) -> Vec<EngineEvent> {
        let (Some(paused_at), Some(end_anchor)) = (self.paused_at, self.end_anchor) else {
            return Vec::new();
        };
        if self.remaining.is_zero() {
            return Vec::new();
        }

        let now = self.clock.now();
        let shifted = end_anchor
            .checked_add(now.saturating_duration_since(paused_at))
            .unwrap_or(end_anchor);
        self.end_anchor = Some(shifted);
        self.remaining = shifted.saturating_duration_since(now);
        self.paused_at = None;
        self.next_tick = Some(now + TICK_INTERVAL);

        info!("Countdown resumed with {:.1}s remaining", self.remaining.as_secs_f64());
        vec![EngineEvent::Resumed {
            remaining: self.remaining,
        }]
    }

    pub fn remaining_time(&self) -> Duration {
        self.remaining
    }

    pub fn total_time(&self) -> Duration {
        self.total
    }

    /// Counting down right now: active, not paused, time left
    pub fn is_running(&self) -> bool {
        !self.remaining.is_zero() && self.active && !self.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// True from start until stop or completion, including while paused
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining / total, clamped to [0, 1]
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// When the host scheduler should call `tick` next
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.next_tick
    }

    fn finish(&mut self, terminal: EngineEvent) -> Vec<EngineEvent> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;
        vec![
            EngineEvent::Update {
                progress: 0.0,
                remaining: Duration::ZERO,
            },
            terminal,
        ]
    }
}

/// Convert a requested duration in seconds, rejecting anything not positive,
/// not finite, or longer than `MAX_DURATION`
pub fn duration_from_secs(seconds: f64) -> Result<Duration, TimerError> {
    if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_DURATION.as_secs_f64() {
        return Err(TimerError::InvalidDuration(seconds));
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| TimerError::InvalidDuration(seconds))
}

/// Keep ticks on the start-aligned one-second grid, skipping missed slots
fn next_deadline(previous: Option<Instant>, now: Instant) -> Instant {
    match previous {
        Some(due) if now < due => due,
        Some(due) if due + TICK_INTERVAL > now => due + TICK_INTERVAL,
        _ => now + TICK_INTERVAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;

    fn engine() -> (TimerEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (TimerEngine::with_clock(clock.clone()), clock)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn progress_of(event: &EngineEvent) -> Option<f64> {
        match event {
            EngineEvent::Update { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    #[test]
    fn start_resets_state_and_reports_full_progress() {
        let (mut engine, _clock) = engine();

        let events = engine.start(secs(60)).unwrap();

        assert_eq!(engine.total_time(), secs(60));
        assert_eq!(engine.remaining_time(), secs(60));
        assert!(engine.is_running());
        assert!(!engine.is_paused());
        assert_eq!(
            events,
            vec![EngineEvent::Update {
                progress: 1.0,
                remaining: secs(60)
            }]
        );
    }

    #[test]
    fn zero_duration_is_rejected_without_touching_state() {
        let (mut engine, clock) = engine();
        engine.start(secs(30)).unwrap();
        clock.advance(secs(1));
        engine.tick();
        let remaining = engine.remaining_time();

        let result = engine.start(Duration::ZERO);

        assert_eq!(result, Err(TimerError::InvalidDuration(0.0)));
        assert_eq!(engine.total_time(), secs(30));
        assert_eq!(engine.remaining_time(), remaining);
        assert!(engine.is_running());
    }

    #[test]
    fn restart_replaces_the_active_run() {
        let (mut engine, clock) = engine();
        engine.start(secs(60)).unwrap();
        clock.advance(secs(5));
        engine.tick();

        let events = engine.start(secs(30)).unwrap();

        assert_eq!(engine.total_time(), secs(30));
        assert_eq!(engine.remaining_time(), secs(30));
        assert!(engine.is_running());
        assert_eq!(
            events,
            vec![
                EngineEvent::Update {
                    progress: 0.0,
                    remaining: Duration::ZERO
                },
                EngineEvent::Stopped,
                EngineEvent::Update {
                    progress: 1.0,
                    remaining: secs(30)
                },
            ]
        );
    }

    #[test]
    fn ticking_to_zero_completes_exactly_once() {
        let (mut engine, clock) = engine();
        let mut events = engine.start(secs(10)).unwrap();

        for _ in 0..12 {
            clock.advance(TICK_INTERVAL);
            events.extend(engine.tick());
        }

        let progress: Vec<f64> = events.iter().filter_map(progress_of).collect();
        assert_eq!(progress.first(), Some(&1.0));
        assert_eq!(progress.last(), Some(&0.0));
        assert!(progress.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(progress.len(), 11);

        let completed = events.iter().filter(|e| **e == EngineEvent::Completed).count();
        assert_eq!(completed, 1);
        assert!(!events.contains(&EngineEvent::Stopped));
        assert_eq!(events.last(), Some(&EngineEvent::Completed));

        assert!(!engine.is_running());
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_time(), Duration::ZERO);
        assert_eq!(engine.next_tick_due(), None);
    }

    #[test]
    fn stop_clears_the_run_and_never_completes() {
        let (mut engine, _clock) = engine();
        engine.start(secs(60)).unwrap();

        let events = engine.stop();

        assert_eq!(engine.remaining_time(), Duration::ZERO);
        assert_eq!(engine.total_time(), Duration::ZERO);
        assert!(!engine.is_running());
        assert_eq!(engine.next_tick_due(), None);
        assert_eq!(
            events,
            vec![
                EngineEvent::Update {
                    progress: 0.0,
                    remaining: Duration::ZERO
                },
                EngineEvent::Stopped,
            ]
        );
        assert!(engine.stop().is_empty());
    }

    #[test]
    fn stop_after_completion_is_silent() {
        let (mut engine, clock) = engine();
        engine.start(secs(1)).unwrap();
        clock.advance(secs(2));
        assert!(engine.tick().contains(&EngineEvent::Completed));

        assert!(engine.stop().is_empty());
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn pause_then_resume_shifts_the_anchor() {
        let (mut engine, clock) = engine();
        engine.start(secs(5)).unwrap();
        clock.advance(secs(2));
        engine.tick();

        assert_eq!(engine.pause(), vec![EngineEvent::Paused { remaining: secs(3) }]);
        assert!(engine.is_paused());
        assert!(!engine.is_running());
        assert_eq!(engine.next_tick_due(), None);

        clock.advance(secs(3));
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining_time(), secs(3));

        assert_eq!(engine.resume(), vec![EngineEvent::Resumed { remaining: secs(3) }]);
        assert!(engine.is_running());
        assert_eq!(engine.remaining_time(), secs(3));

        clock.advance(secs(1));
        let events = engine.tick();
        assert_eq!(engine.remaining_time(), secs(2));
        assert_eq!(progress_of(&events[0]), Some(0.4));
    }

    #[test]
    fn invalid_pause_and_resume_are_no_ops() {
        let (mut engine, _clock) = engine();
        assert!(engine.pause().is_empty());
        assert!(engine.resume().is_empty());

        engine.start(secs(10)).unwrap();
        assert!(engine.resume().is_empty());
        assert_eq!(engine.pause().len(), 1);
        assert!(engine.pause().is_empty());
    }

    #[test]
    fn stop_while_paused_ends_the_run() {
        let (mut engine, clock) = engine();
        engine.start(secs(10)).unwrap();
        engine.pause();
        clock.advance(secs(4));

        let events = engine.stop();

        assert_eq!(events.last(), Some(&EngineEvent::Stopped));
        assert!(!engine.is_paused());
        assert!(engine.resume().is_empty());
    }

    #[test]
    fn non_positive_seconds_are_invalid() {
        assert_eq!(duration_from_secs(90.0), Ok(secs(90)));
        assert_eq!(duration_from_secs(0.5), Ok(Duration::from_millis(500)));
        assert_eq!(duration_from_secs(0.0), Err(TimerError::InvalidDuration(0.0)));
        assert_eq!(duration_from_secs(-5.0), Err(TimerError::InvalidDuration(-5.0)));
        assert!(duration_from_secs(f64::NAN).is_err());
        assert!(duration_from_secs(f64::INFINITY).is_err());
        assert_eq!(duration_from_secs(1e19), Err(TimerError::InvalidDuration(1e19)));
        assert_eq!(duration_from_secs(MAX_DURATION.as_secs_f64()), Ok(MAX_DURATION));
    }

    #[test]
    fn oversized_duration_is_rejected_without_touching_state() {
        let (mut engine, clock) = engine();
        engine.start(secs(30)).unwrap();
        clock.advance(secs(1));
        engine.tick();

        assert!(engine.start(Duration::MAX).is_err());
        assert!(engine.start(MAX_DURATION + secs(1)).is_err());

        assert!(engine.is_running());
        assert_eq!(engine.total_time(), secs(30));
        assert_eq!(engine.remaining_time(), secs(29));

        assert!(engine.start(MAX_DURATION).is_ok());
        assert_eq!(engine.total_time(), MAX_DURATION);
    }

    #[test]
    fn tick_deadline_stays_on_the_one_second_grid() {
        let (mut engine, clock) = engine();
        engine.start(secs(10)).unwrap();
        let first = engine.next_tick_due().unwrap();

        clock.advance(secs(1));
        engine.tick();
        assert_eq!(engine.next_tick_due(), Some(first + TICK_INTERVAL));

        // a late tick skips the missed slots
        clock.advance(Duration::from_millis(3500));
        engine.tick();
        assert_eq!(engine.next_tick_due(), Some(clock.now() + TICK_INTERVAL));
    }
}
