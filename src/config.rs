//! Configuration and CLI argument handling

use clap::Parser;
use std::path::PathBuf;

use crate::{preset::Preset, services::SoundConfig};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tick-timer")]
#[command(about = "A countdown timer daemon with progress bands and sound cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable sound cues at startup
    #[arg(short, long)]
    pub sounds: bool,

    /// Audio player invoked with a sound file path
    #[arg(long, default_value = "paplay")]
    pub sound_command: String,

    /// Directory holding the <Name>.oga sound files
    #[arg(long, default_value = "/usr/share/sounds/tick")]
    pub sound_dir: PathBuf,

    /// Named duration as NAME=MINUTES (repeatable)
    #[arg(long = "preset", value_name = "NAME=MINUTES")]
    pub presets: Vec<Preset>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Configured presets, or the built-in set when none were given
    pub fn presets(&self) -> Vec<Preset> {
        if self.presets.is_empty() {
            Preset::defaults()
        } else {
            self.presets.clone()
        }
    }

    pub fn sound_config(&self) -> SoundConfig {
        SoundConfig {
            command: self.sound_command.clone(),
            sound_dir: self.sound_dir.clone(),
        }
    }
}
