//! Named countdown durations

use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

use crate::{error::TimerError, timer::duration_from_secs};

/// A named duration the user can start with one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub duration_seconds: f64,
}

impl Preset {
    pub fn from_minutes(name: &str, minutes: f64) -> Self {
        Self {
            name: name.to_string(),
            duration_seconds: minutes * 60.0,
        }
    }

    pub fn duration(&self) -> Result<Duration, TimerError> {
        duration_from_secs(self.duration_seconds)
    }

    /// Presets used when none are configured
    pub fn defaults() -> Vec<Preset> {
        vec![
            Preset::from_minutes("Pomodoro", 25.0),
            Preset::from_minutes("Short Break", 5.0),
            Preset::from_minutes("Long Break", 15.0),
        ]
    }
}

/// Find a preset by name, ignoring case
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Parses `NAME=MINUTES`
impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, minutes) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=MINUTES, got '{}'", s))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(format!("preset name is empty in '{}'", s));
        }

        let minutes: f64 = minutes
            .trim()
            .parse()
            .map_err(|e| format!("invalid minutes in '{}': {}", s, e))?;
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(format!("preset '{}' must last a positive number of minutes", name));
        }

        Ok(Preset::from_minutes(name, minutes))
    }
}
