pub mod benchmark;
pub mod cache;
pub mod metrics;
pub mod packet;
pub mod resolve;

pub use benchmark::BenchmarkResponse;
pub use cache::{CacheClearedResponse, CacheEntryDto, CacheResponse, CacheStatsDto};
pub use metrics::{MetricsQuery, MetricsResponse, QueryRecordDto};
pub use packet::{PacketRequest, PacketResponse};
pub use resolve::{AnswerDto, OutcomeErrorResponse, ResolveRequest, ResolveResponse};

fn default_record_type() -> String {
    "A".to_string()
}
