use dnscope_application::services::QueryRecord;
use dnscope_domain::{ResolutionMode, ResolutionSource};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct MetricsQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize, Debug, Clone)]
pub struct QueryRecordDto {
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub mode: ResolutionMode,
    pub source: ResolutionSource,
    pub duration_ms: f64,
    pub status: String,
    pub timestamp: String,
}

impl From<QueryRecord> for QueryRecordDto {
    fn from(record: QueryRecord) -> Self {
        Self {
            domain: record.domain.to_string(),
            record_type: record.record_type.to_u16(),
            mode: record.mode,
            source: record.source,
            duration_ms: record.duration_ms,
            status: record.status,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MetricsResponse {
    pub total_queries: u64,
    pub successes: u64,
    pub failures: u64,
    pub average_latency_ms: f64,
    pub recent: Vec<QueryRecordDto>,
}
