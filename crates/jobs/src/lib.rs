pub mod cache_compaction;
pub mod runner;

pub use cache_compaction::CacheCompactionJob;
pub use runner::JobRunner;
