//! Countdown core: the engine that tracks one run and the coordinator that
//! turns its events into sink notifications.

pub mod band;
pub mod clock;
pub mod coordinator;
pub mod engine;

pub use band::Band;
pub use clock::{Clock, TokioClock};
pub use coordinator::TimerCoordinator;
pub use engine::{duration_from_secs, EngineEvent, TimerEngine, MAX_DURATION, TICK_INTERVAL};
