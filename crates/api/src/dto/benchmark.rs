use dnscope_domain::BenchmarkRow;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct BenchmarkResponse {
    pub results: Vec<BenchmarkRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
