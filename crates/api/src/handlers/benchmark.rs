use crate::{dto::BenchmarkResponse, state::AppState};
use axum::{extract::State, Json};
use dnscope_domain::BenchmarkReport;
use tracing::{debug, info, instrument};

#[instrument(skip(state), name = "api_run_benchmark")]
pub async fn run_benchmark(State(state): State<AppState>) -> Json<BenchmarkResponse> {
    let response = match state.run_benchmark.execute().await {
        BenchmarkReport::Rows(results) => {
            debug!(rows = results.len(), "Benchmark rows returned");
            BenchmarkResponse {
                results,
                message: None,
            }
        }
        BenchmarkReport::Declined(message) => {
            info!(reason = %message, "Benchmark declined");
            BenchmarkResponse {
                results: Vec::new(),
                message: Some(message),
            }
        }
    };
    Json(response)
}
