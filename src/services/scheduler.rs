use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::registry::MemberRegistry;

/// Periodically reloads the member registry and tells observers when the
/// list content changed since the previous poll. Observers receive the new
/// member count over a watch channel.
pub struct PollScheduler {
    registry: Arc<MemberRegistry>,
    interval: Duration,
    changes: watch::Sender<usize>,
}

impl PollScheduler {
    pub fn new(
        registry: Arc<MemberRegistry>,
        interval_secs: u64,
    ) -> (Self, watch::Receiver<usize>) {
        let (changes, receiver) = watch::channel(0);
        (
            Self {
                registry,
                interval: Duration::from_secs(interval_secs),
                changes,
            },
            receiver,
        )
    }

    /// Runs the poll loop until the task is dropped. Reload failures are
    /// logged and the loop continues.
    pub async fn start(self) {
        info!("starting registry poll loop (interval: {:?})", self.interval);
        let mut seen = self.registry.list().await;

        loop {
            tokio::time::sleep(self.interval).await;

            match self.registry.load().await {
                Ok(current) => {
                    if current != seen {
                        info!(
                            "registry changed ({} -> {} members)",
                            seen.len(),
                            current.len()
                        );
                        let _ = self.changes.send(current.len());
                        seen = current;
                    }
                }
                Err(err) => {
                    warn!("registry poll failed: {}", err);
                }
            }
        }
    }
}
