//! Tick Timer - A countdown timer daemon for desktop status bars
//!
//! This is the main entry point for the tick-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tick_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_sound_command_available, CommandSoundPlayer},
    sinks::SoundToggle,
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tick_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tick-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, sounds={}",
          config.host, config.port, config.sounds);

    // Sound cues are optional; a missing player only disables playback
    let sound_config = config.sound_config();
    if let Err(e) = check_sound_command_available(&sound_config).await {
        warn!("{}", e);
    }

    // Create application state
    let presets = config.presets();
    for preset in &presets {
        info!("Preset: {} ({}s)", preset.name, preset.duration_seconds);
    }
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        presets,
        SoundToggle::new(config.sounds),
        Some(CommandSoundPlayer::new(sound_config)),
    ));

    // Start the countdown ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start         - Start a countdown ({{\"seconds\"|\"minutes\"|\"preset\": ...}})");
    info!("  POST /stop          - Stop the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /resume        - Resume a paused countdown");
    info!("  GET  /status        - Current remaining time and band");
    info!("  GET  /presets       - List presets");
    info!("  POST /sounds/toggle - Enable or disable sound cues");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Silence the sound cue for a countdown cut short by shutdown
    if let Err(e) = state.with_coordinator(None, |c| c.stop(true)) {
        warn!("Failed to stop countdown on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
