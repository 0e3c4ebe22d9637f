//! Selection Monitor
//!
//! Polling loop that feeds the selection tracker from a clipboard-like
//! source. Reads the source at a fixed interval and offers the value to the
//! tracker whenever it differs from the last seen value; the tracker's own
//! gate and cooldown decide whether the sample is recorded.
//!
//! The loop runs on a spawned task and honors a cancellation token at its
//! only suspension point, so `stop()` takes effect within one tick.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use codesense_core::ClipboardSource;

use super::tracker::SelectionTracker;

/// Default poll interval in milliseconds
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Configuration for the selection monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between clipboard reads
    pub poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Clipboard polling monitor feeding a [`SelectionTracker`].
pub struct SelectionMonitor {
    tracker: SelectionTracker,
    source: Arc<dyn ClipboardSource>,
    config: MonitorConfig,
    cancel: CancellationToken,
}

impl SelectionMonitor {
    /// Create a monitor with the default poll interval.
    pub fn new(tracker: SelectionTracker, source: Arc<dyn ClipboardSource>) -> Self {
        Self::with_config(tracker, source, MonitorConfig::default())
    }

    /// Create a monitor with custom configuration.
    pub fn with_config(
        tracker: SelectionTracker,
        source: Arc<dyn ClipboardSource>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            tracker,
            source,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the polling loop when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request the polling loop to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Spawn the polling loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// The polling loop itself.
    async fn run(self) {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        // Prime with whatever is already on the clipboard so pre-existing
        // content is not treated as a fresh selection.
        let mut last_seen = self.source.read_text().await;

        info!(interval_ms = self.config.poll_interval_ms, "selection monitoring started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("selection monitoring stopped");
                    break;
                }
                _ = tokio::time::sleep(poll_interval) => {
                    let Some(text) = self.source.read_text().await else {
                        continue;
                    };
                    if last_seen.as_deref() == Some(text.as_str()) {
                        continue;
                    }
                    last_seen = Some(text.clone());
                    if self.tracker.observe(&text).await {
                        debug!("clipboard change recorded");
                    }
                }
            }
        }
    }
}
