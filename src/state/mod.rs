//! State management module
//!
//! This module contains the shared host state and the timer snapshot.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::TimerState;
