mod query_metrics;

pub use query_metrics::{MetricsSummary, QueryMetrics, QueryRecord};
