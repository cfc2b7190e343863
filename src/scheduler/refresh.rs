//! Periodic refresh scheduler
//!
//! Runs the initial load, then repeats the full fetch-and-render cycle every
//! period. There is no backoff and no pause on failure: a failed cycle is
//! reported by its own toast and the next one starts on schedule.

use crate::services::RefreshService;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Refresh scheduler bound to one application state
pub struct RefreshScheduler {
    state: Arc<AppState>,
    period: Duration,
}

impl RefreshScheduler {
    pub fn new(state: Arc<AppState>, period: Duration) -> Self {
        Self { state, period }
    }

    /// Start the scheduler on the tokio runtime
    ///
    /// The first cycle runs immediately; later cycles run `period` apart. A cycle
    /// that overruns delays the next tick instead of bunching ticks up.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let Self { state, period } = self;

        let task = tokio::spawn(async move {
            info!("Refresh scheduler started (every {}s)", period.as_secs());

            if let Err(e) = RefreshService::load_master_choices(&state).await {
                warn!("Failed to load master choices: {}", e);
            }
            RefreshService::refresh_all(&state).await;

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        debug!("Scheduled refresh");
                        RefreshService::refresh_all(&state).await;
                    }
                }
            }

            info!("Refresh scheduler stopped");
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop after the in-flight cycle, if any, completes
    pub async fn stop(self) {
        // The task may already be gone; nothing to signal then
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!("Refresh scheduler task failed: {}", e);
        }
    }
}
