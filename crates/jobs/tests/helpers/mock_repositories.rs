#![allow(dead_code)]

use async_trait::async_trait;
use dnscope_application::ports::{CacheCompactionOutcome, CacheMaintenancePort};
use dnscope_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct MockCacheMaintenancePort {
    compaction_calls: AtomicU64,
    should_fail: AtomicBool,
    removed_per_cycle: usize,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            compaction_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
            removed_per_cycle: 0,
        }
    }

    pub fn removing(removed_per_cycle: usize) -> Self {
        Self {
            removed_per_cycle,
            ..Self::new()
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn compaction_call_count(&self) -> u64 {
        self.compaction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        self.compaction_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Config("mock compaction failure".into()));
        }
        Ok(CacheCompactionOutcome {
            entries_removed: self.removed_per_cycle,
            cache_size: 10,
        })
    }
}
