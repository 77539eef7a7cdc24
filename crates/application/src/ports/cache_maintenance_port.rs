use async_trait::async_trait;
use dnscope_domain::DomainError;

/// Outcome of a cache compaction cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheCompactionOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic cache upkeep driven by the jobs crate.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError>;
}
