//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{sleep, sleep_until};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Background task that calls `tick` whenever the countdown's next deadline passes
///
/// The deadline is published on a watch channel after every timer operation,
/// so a stop or pause takes effect before the pending sleep would fire.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut schedule_rx = state.subscribe_schedule();

    loop {
        let next_tick = *schedule_rx.borrow_and_update();

        match next_tick {
            Some(deadline) => {
                tokio::select! {
                    _ = sleep_until(deadline) => {
                        if let Err(e) = state.tick() {
                            error!("Failed to tick countdown: {}", e);
                            // Wait a bit before retrying
                            sleep(Duration::from_secs(1)).await;
                        }
                    }

                    // Schedule changed - re-read the deadline
                    changed = schedule_rx.changed() => {
                        if changed.is_err() {
                            warn!("Tick schedule channel closed, stopping ticker");
                            break;
                        }
                        debug!("Tick schedule changed");
                    }
                }
            }
            None => {
                debug!("No countdown scheduled, waiting");
                if schedule_rx.changed().await.is_err() {
                    warn!("Tick schedule channel closed, stopping ticker");
                    break;
                }
            }
        }
    }
}
