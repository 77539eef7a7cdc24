use crate::dns_name::DomainName;
use crate::dns_record::{RecordType, ResourceRecord};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: DomainName,
    pub record_type: RecordType,
}

impl CacheKey {
    pub fn new(domain: DomainName, record_type: RecordType) -> Self {
        Self {
            domain,
            record_type,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.record_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Valid,
    Expired,
    Absent,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Valid => "valid",
            CacheStatus::Expired => "expired",
            CacheStatus::Absent => "absent",
        }
    }
}

/// Result of a single cache read. `records` is populated for both Valid and
/// Expired entries; only Valid satisfies a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    pub status: CacheStatus,
    pub records: Vec<ResourceRecord>,
    pub remaining_ttl: u32,
}

impl CacheLookup {
    pub fn absent() -> Self {
        Self {
            status: CacheStatus::Absent,
            records: Vec::new(),
            remaining_ttl: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == CacheStatus::Valid
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
    pub evictions: u64,
    pub insertions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryView {
    pub domain: DomainName,
    pub record_type: RecordType,
    pub ttl: u32,
    pub status: CacheStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub stats: CacheStats,
    pub entries: Vec<CacheEntryView>,
}
