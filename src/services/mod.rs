//! External side-effect services
//!
//! This module contains the collaborators that reach outside the process,
//! such as the audio player used for sound cues.

pub mod sound;

// Re-export main types
pub use sound::*;
