//! Fans engine events out to the registered sinks
//!
//! Visual sinks see every progress sample. Audible sinks only hear
//! transitions: the start of a run, a change of band, pause/resume and the
//! end of a run. A restart stops the old run silently so only the new run's
//! start cue plays.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::{
    band::Band,
    clock::{Clock, TokioClock},
    engine::{duration_from_secs, EngineEvent, TimerEngine},
};
use crate::{
    error::TimerError,
    sinks::{ProgressUpdate, SinkKind, SoundPreference, TimerSink},
};

enum Ending {
    Completed,
    Stopped,
}

pub struct TimerCoordinator<C: Clock = TokioClock> {
    engine: TimerEngine<C>,
    /// Notified in registration order
    sinks: Vec<(SinkKind, Box<dyn TimerSink>)>,
    sounds: Arc<dyn SoundPreference>,
    last_band: Option<Band>,
    /// The next update is the first sample of a fresh run
    awaiting_first_update: bool,
}

impl TimerCoordinator<TokioClock> {
    pub fn new(sounds: Arc<dyn SoundPreference>) -> Self {
        Self::with_engine(TimerEngine::new(), sounds)
    }
}

impl<C: Clock> TimerCoordinator<C> {
    pub fn with_engine(engine: TimerEngine<C>, sounds: Arc<dyn SoundPreference>) -> Self {
        Self {
            engine,
            sinks: Vec::new(),
            sounds,
            last_band: None,
            awaiting_first_update: false,
        }
    }

    /// Register a sink; sinks are notified in the order they were added
    pub fn add_sink<S>(&mut self, kind: SinkKind, sink: S) -> &mut Self
    where
        S: TimerSink + 'static,
    {
        self.sinks.push((kind, Box::new(sink)));
        self
    }

    /// Start a countdown, silently replacing any run in progress
    pub fn start(&mut self, duration: Duration) -> Result<(), TimerError> {
        // reject before the old run is touched
        self.engine.validate(duration)?;

        if self.engine.is_active() {
            info!("Restarting countdown, superseded run stops silently");
            self.stop(true);
        }

        let events = self.engine.start(duration)?;
        self.awaiting_first_update = true;
        self.dispatch(events, false);
        Ok(())
    }

    /// Start a countdown from a duration in seconds
    pub fn start_secs(&mut self, seconds: f64) -> Result<(), TimerError> {
        self.start(duration_from_secs(seconds)?)
    }

    /// Stop the current run. Returns false if nothing was running.
    pub fn stop(&mut self, suppress_stop_signal: bool) -> bool {
        let events = self.engine.stop();
        let changed = !events.is_empty();
        self.dispatch(events, suppress_stop_signal);
        changed
    }

    pub fn pause(&mut self) -> bool {
        let events = self.engine.pause();
        let changed = !events.is_empty();
        self.dispatch(events, false);
        changed
    }

    pub fn resume(&mut self) -> bool {
        let events = self.engine.resume();
        let changed = !events.is_empty();
        self.dispatch(events, false);
        changed
    }

    /// Advance the countdown; called by the host scheduler
    pub fn tick(&mut self) {
        let events = self.engine.tick();
        self.dispatch(events, false);
    }

    pub fn remaining_time(&self) -> Duration {
        self.engine.remaining_time()
    }

    pub fn total_time(&self) -> Duration {
        self.engine.total_time()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn progress(&self) -> f64 {
        self.engine.progress()
    }

    pub fn next_tick_due(&self) -> Option<Instant> {
        self.engine.next_tick_due()
    }

    /// Band last announced to sinks in the current run
    pub fn last_band(&self) -> Option<Band> {
        self.last_band
    }

    fn dispatch(&mut self, events: Vec<EngineEvent>, suppress_stop_signal: bool) {
        let mut events = events.into_iter().peekable();
        while let Some(event) = events.next() {
            let before_ending = events.peek().is_some_and(EngineEvent::is_terminal);
            match event {
                EngineEvent::Update {
                    progress,
                    remaining,
                } => self.on_update(ProgressUpdate::new(progress, remaining), before_ending),
                EngineEvent::Completed => self.on_ending(Ending::Completed, false),
                EngineEvent::Stopped => self.on_ending(Ending::Stopped, suppress_stop_signal),
                EngineEvent::Paused { remaining } => {
                    self.notify(true, |sink| sink.on_paused(remaining))
                }
                EngineEvent::Resumed { remaining } => {
                    self.notify(true, |sink| sink.on_resumed(remaining))
                }
            }
        }
    }

    fn on_update(&mut self, update: ProgressUpdate, before_ending: bool) {
        self.notify(false, |sink| sink.on_progress(&update));

        // the final 0.0 sample is drawn but gets no band cue; the ending cue follows
        if before_ending {
            return;
        }

        if self.awaiting_first_update {
            self.awaiting_first_update = false;
            self.last_band = Some(update.band);
            self.notify(true, |sink| sink.on_started(&update));
            return;
        }

        if self.last_band != Some(update.band) {
            debug!("Band changed to {}", update.band);
            self.last_band = Some(update.band);
            self.notify(true, |sink| sink.on_band_changed(update.band));
        }
    }

    fn on_ending(&mut self, ending: Ending, suppress_stop_signal: bool) {
        self.last_band = None;
        self.awaiting_first_update = false;

        let audible = !suppress_stop_signal;
        match ending {
            Ending::Completed => self.notify(audible, |sink| sink.on_complete()),
            Ending::Stopped => self.notify(audible, |sink| sink.on_stopped()),
        }
    }

    /// Call `f` on every visual sink, and on audible sinks too when
    /// `audible` is set and sounds are enabled
    fn notify<F>(&mut self, audible: bool, mut f: F)
    where
        F: FnMut(&mut dyn TimerSink),
    {
        let sounds_on = audible && self.sounds.sounds_enabled();
        for (kind, sink) in self.sinks.iter_mut() {
            if *kind == SinkKind::Audible && !sounds_on {
                continue;
            }
            f(sink.as_mut());
        }
    }
}
