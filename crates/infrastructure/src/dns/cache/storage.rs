use super::metrics::CacheMetrics;
use async_trait::async_trait;
use dnscope_application::ports::{CacheCompactionOutcome, CacheMaintenancePort, DnsCachePort};
use dnscope_domain::{
    CacheEntryView, CacheKey, CacheLookup, CacheSnapshot, CacheStats, CacheStatus, DomainError,
    ResourceRecord,
};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct CachedEntry {
    records: Vec<ResourceRecord>,
    inserted_at: Instant,
    ttl: u32,
}

impl CachedEntry {
    /// Whole seconds left before expiry, rounded up. Zero means expired.
    fn remaining_ttl(&self, now: Instant) -> u32 {
        let expires_at = self.inserted_at + Duration::from_secs(u64::from(self.ttl));
        let left = expires_at.saturating_duration_since(now);
        let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        secs.min(u64::from(u32::MAX)) as u32
    }
}

/// Bounded TTL cache keyed by (domain, type) with least-recently-used
/// eviction. Expired entries stay until they are evicted, overwritten or
/// compacted, and are reported as `Expired` in the meantime.
pub struct RecordCache {
    entries: Mutex<LruCache<CacheKey, CachedEntry>>,
    capacity: usize,
    metrics: CacheMetrics,
}

impl RecordCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        debug!(capacity = capacity.get(), "Record cache created");
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
            metrics: CacheMetrics::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, CachedEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn stats_with_size(&self, size: usize) -> CacheStats {
        CacheStats {
            hits: self.metrics.hits(),
            misses: self.metrics.misses(),
            size,
            capacity: self.capacity,
            evictions: self.metrics.evictions.load(AtomicOrdering::Relaxed),
            insertions: self.metrics.insertions.load(AtomicOrdering::Relaxed),
        }
    }
}

impl DnsCachePort for RecordCache {
    fn lookup(&self, key: &CacheKey) -> CacheLookup {
        let now = Instant::now();
        let mut entries = self.lock();

        let Some(entry) = entries.peek(key) else {
            self.metrics.record_miss();
            return CacheLookup::absent();
        };

        let remaining_ttl = entry.remaining_ttl(now);
        if remaining_ttl == 0 {
            self.metrics.record_miss();
            return CacheLookup {
                status: CacheStatus::Expired,
                records: entry.records.clone(),
                remaining_ttl: 0,
            };
        }

        let records = entry.records.clone();
        entries.promote(key);
        self.metrics.record_hit();
        CacheLookup {
            status: CacheStatus::Valid,
            records,
            remaining_ttl,
        }
    }

    fn store(&self, key: CacheKey, records: Vec<ResourceRecord>, ttl: u32) {
        let entry = CachedEntry {
            records,
            inserted_at: Instant::now(),
            ttl,
        };

        let mut entries = self.lock();
        let displaced = entries.push(key.clone(), entry);
        self.metrics
            .insertions
            .fetch_add(1, AtomicOrdering::Relaxed);

        if let Some((evicted, _)) = displaced {
            if evicted != key {
                self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(evicted = %evicted, inserted = %key, "Cache entry evicted");
            }
        }
    }

    fn clear(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        removed
    }

    fn snapshot(&self) -> CacheSnapshot {
        let now = Instant::now();
        let entries = self.lock();

        let views = entries
            .iter()
            .map(|(key, entry)| {
                let ttl = entry.remaining_ttl(now);
                CacheEntryView {
                    domain: key.domain.clone(),
                    record_type: key.record_type,
                    ttl,
                    status: if ttl > 0 {
                        CacheStatus::Valid
                    } else {
                        CacheStatus::Expired
                    },
                }
            })
            .collect();

        CacheSnapshot {
            stats: self.stats_with_size(entries.len()),
            entries: views,
        }
    }

    fn compact(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();

        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.remaining_ttl(now) == 0)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }

        let removed = expired.len();
        if removed > 0 {
            debug!(
                removed,
                cache_size = entries.len(),
                "Cache compaction completed"
            );
        }
        removed
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[async_trait]
impl CacheMaintenancePort for RecordCache {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        let entries_removed = self.compact();
        Ok(CacheCompactionOutcome {
            entries_removed,
            cache_size: self.len(),
        })
    }
}
