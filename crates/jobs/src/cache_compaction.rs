use dnscope_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_COMPACTION_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired cache entries. The first cycle runs as soon
/// as the job starts.
pub struct CacheCompactionJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheCompactionJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval_secs: DEFAULT_COMPACTION_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    /// An interval of zero disables the job.
    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if self.interval_secs == 0 {
                info!("CacheCompactionJob: disabled (interval 0)");
                return;
            }
            info!(interval_secs = self.interval_secs, "Starting cache compaction job");

            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheCompactionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.maintenance.run_compaction_cycle().await {
                            Ok(outcome) if outcome.entries_removed > 0 => {
                                info!(
                                    entries_removed = outcome.entries_removed,
                                    cache_size = outcome.cache_size,
                                    "Cache compaction cycle completed"
                                );
                            }
                            Ok(outcome) => {
                                debug!(cache_size = outcome.cache_size, "Nothing to compact");
                            }
                            Err(e) => {
                                error!(error = %e, "Cache compaction cycle failed");
                            }
                        }
                    }
                }
            }
        })
    }
}
