//! Tick Timer - A countdown timer daemon for desktop status bars
//!
//! This library provides the countdown core (an anchor-based engine and a
//! coordinator that fans progress out to overlay, status and sound sinks)
//! along with the HTTP control surface that hosts it.

pub mod config;
pub mod error;
pub mod preset;
pub mod sinks;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::AppState;
pub use api::create_router;
pub use timer::{Band, TimerCoordinator, TimerEngine};
pub use utils::signals::shutdown_signal;
