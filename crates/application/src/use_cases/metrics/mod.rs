use crate::services::{MetricsSummary, QueryMetrics};
use std::sync::Arc;

const DEFAULT_RECENT: usize = 50;

pub struct GetQueryMetricsUseCase {
    metrics: Arc<QueryMetrics>,
}

impl GetQueryMetricsUseCase {
    pub fn new(metrics: Arc<QueryMetrics>) -> Self {
        Self { metrics }
    }

    pub fn execute(&self, recent: Option<usize>) -> MetricsSummary {
        self.metrics.summary(recent.unwrap_or(DEFAULT_RECENT))
    }
}
