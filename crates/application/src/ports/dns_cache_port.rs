use dnscope_domain::{CacheKey, CacheLookup, CacheSnapshot, ResourceRecord};

/// Port for the shared record cache.
pub trait DnsCachePort: Send + Sync {
    /// Counts exactly one hit (Valid) or one miss (Expired/Absent).
    fn lookup(&self, key: &CacheKey) -> CacheLookup;

    fn store(&self, key: CacheKey, records: Vec<ResourceRecord>, ttl: u32);

    /// Drops every entry and returns how many were removed. Counters survive.
    fn clear(&self) -> usize;

    fn snapshot(&self) -> CacheSnapshot;

    /// Drops expired entries and returns how many were removed.
    fn compact(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
