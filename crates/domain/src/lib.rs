//! dnscope domain layer: value types, error taxonomy and configuration.

pub mod benchmark;
pub mod cache;
pub mod config;
pub mod dns_name;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolution;

pub use benchmark::{BenchmarkReport, BenchmarkRow, TargetLatency};
pub use cache::{CacheEntryView, CacheKey, CacheLookup, CacheSnapshot, CacheStats, CacheStatus};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_name::DomainName;
pub use dns_query::{DnsQuery, ResolutionMode};
pub use dns_record::{RecordData, RecordType, ResourceRecord, SoaData};
pub use errors::DomainError;
pub use resolution::{DnssecInfo, Resolution, ResolutionOutcome, ResolutionSource};
