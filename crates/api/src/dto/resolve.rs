use dnscope_domain::{DnssecInfo, ResolutionMode, ResolutionSource, ResourceRecord};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct ResolveRequest {
    pub domain: String,
    #[serde(rename = "type", default = "super::default_record_type")]
    pub record_type: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub upstream: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AnswerDto {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub ttl: u32,
    pub data: String,
}

impl From<&ResourceRecord> for AnswerDto {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            name: record.name.to_string(),
            record_type: record.type_code(),
            ttl: record.ttl,
            data: record.data.to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ResolveResponse {
    pub duration_ms: f64,
    pub source: ResolutionSource,
    pub mode: ResolutionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub answers: Vec<AnswerDto>,
    pub dnssec: DnssecInfo,
}

/// NXDOMAIN, server failure or delegation loop. Sent with HTTP 200.
#[derive(Serialize, Debug, Clone)]
pub struct OutcomeErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub mode: ResolutionMode,
    pub duration_ms: f64,
}
