//! Sound cues played through an external audio command

use std::{path::PathBuf, time::Duration};
use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use crate::{
    sinks::{ProgressUpdate, TimerSink},
    timer::Band,
};

/// A sound the timer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Band(Band),
    Paused,
    Resumed,
    /// End of a run, stopped or completed
    Stopped,
}

impl SoundCue {
    /// Name of the sound file (without extension) for this cue
    pub fn sound_name(&self) -> &'static str {
        match self {
            SoundCue::Band(Band::Green) => "Submarine",
            SoundCue::Band(Band::Yellow) => "Ping",
            SoundCue::Band(Band::Red) => "Basso",
            SoundCue::Paused => "Pop",
            SoundCue::Resumed => "Tink",
            SoundCue::Stopped => "Glass",
        }
    }
}

/// Audio player configuration
#[derive(Debug, Clone)]
pub struct SoundConfig {
    /// Program invoked with the sound file path as its only argument
    pub command: String,
    /// Directory holding `<Name>.oga` files
    pub sound_dir: PathBuf,
}

impl SoundConfig {
    pub fn sound_path(&self, cue: SoundCue) -> PathBuf {
        self.sound_dir.join(format!("{}.oga", cue.sound_name()))
    }
}

/// Play a sound file with the configured command and wait for it to finish
pub async fn play_sound(config: &SoundConfig, cue: SoundCue) -> Result<(), String> {
    let path = config.sound_path(cue);
    debug!("Playing {} via {}", path.display(), config.command);

    let output = Command::new(&config.command)
        .arg(&path)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", config.command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", config.command, stderr));
    }

    Ok(())
}

/// Check if the configured audio command can be launched
pub async fn check_sound_command_available(config: &SoundConfig) -> Result<(), String> {
    Command::new(&config.command)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("{} is not available, sound cues will fail", config.command))?;

    info!("{} is available", config.command);
    Ok(())
}

/// Audible sink that plays each cue in the background
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    config: SoundConfig,
}

impl CommandSoundPlayer {
    pub fn new(config: SoundConfig) -> Self {
        Self { config }
    }

    /// Fire and forget: the timer never waits for playback
    fn play(&self, cue: SoundCue) {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available, skipping {} sound", cue.sound_name());
            return;
        };

        let config = self.config.clone();
        handle.spawn(async move {
            if let Err(e) = play_sound(&config, cue).await {
                warn!("Failed to play {} sound: {}", cue.sound_name(), e);
            }
        });
    }
}

impl TimerSink for CommandSoundPlayer {
    fn on_band_changed(&mut self, band: Band) {
        self.play(SoundCue::Band(band));
    }

    fn on_started(&mut self, update: &ProgressUpdate) {
        self.play(SoundCue::Band(update.band));
    }

    fn on_paused(&mut self, _remaining: Duration) {
        self.play(SoundCue::Paused);
    }

    fn on_resumed(&mut self, _remaining: Duration) {
        self.play(SoundCue::Resumed);
    }

    fn on_complete(&mut self) {
        self.play(SoundCue::Stopped);
    }

    fn on_stopped(&mut self) {
        self.play(SoundCue::Stopped);
    }
}
