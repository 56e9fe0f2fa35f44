//! Discrete color bands derived from countdown progress

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of progress used to gate transition cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Green,
    Yellow,
    Red,
}

impl Band {
    /// Classify progress (1.0 = just started, 0.0 = finished)
    pub fn from_progress(progress: f64) -> Self {
        if progress > 0.5 {
            Band::Green
        } else if progress > 0.2 {
            Band::Yellow
        } else {
            Band::Red
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::Green => "green",
            Band::Yellow => "yellow",
            Band::Red => "red",
        };
        f.write_str(name)
    }
}
