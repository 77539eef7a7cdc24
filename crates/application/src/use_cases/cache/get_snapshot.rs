use crate::ports::DnsCachePort;
use dnscope_domain::CacheSnapshot;
use std::sync::Arc;

pub struct GetCacheSnapshotUseCase {
    cache: Arc<dyn DnsCachePort>,
}

impl GetCacheSnapshotUseCase {
    pub fn new(cache: Arc<dyn DnsCachePort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheSnapshot {
        self.cache.snapshot()
    }
}
