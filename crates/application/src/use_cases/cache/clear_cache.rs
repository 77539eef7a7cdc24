use crate::ports::DnsCachePort;
use std::sync::Arc;
use tracing::info;

pub struct ClearCacheUseCase {
    cache: Arc<dyn DnsCachePort>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<dyn DnsCachePort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> usize {
        let removed = self.cache.clear();
        info!(entries_removed = removed, "Cache cleared");
        removed
    }
}
