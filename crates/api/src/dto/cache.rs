use dnscope_domain::{CacheEntryView, CacheStats};
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsDto {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
    pub evictions: u64,
    pub insertions: u64,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsDto {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            size: stats.size,
            capacity: stats.capacity,
            evictions: stats.evictions,
            insertions: stats.insertions,
            hit_rate: stats.hit_rate(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheEntryDto {
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub ttl: u32,
    pub status: &'static str,
}

impl From<CacheEntryView> for CacheEntryDto {
    fn from(entry: CacheEntryView) -> Self {
        Self {
            domain: entry.domain.to_string(),
            record_type: entry.record_type.to_u16(),
            ttl: entry.ttl,
            status: entry.status.as_str(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheResponse {
    pub stats: CacheStatsDto,
    pub entries: Vec<CacheEntryDto>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheClearedResponse {
    pub message: String,
    pub removed: usize,
}
