use crate::{
    dto::{MetricsQuery, MetricsResponse, QueryRecordDto},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_metrics")]
pub async fn get_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsQuery>,
) -> Json<MetricsResponse> {
    let summary = state.get_metrics.execute(params.limit);

    debug!(
        total = summary.total_queries,
        average_latency_ms = summary.average_latency_ms,
        "Query metrics retrieved"
    );

    Json(MetricsResponse {
        total_queries: summary.total_queries,
        successes: summary.successes,
        failures: summary.failures,
        average_latency_ms: summary.average_latency_ms,
        recent: summary
            .recent
            .into_iter()
            .map(QueryRecordDto::from)
            .collect(),
    })
}
