use chrono::{DateTime, Utc};
use dnscope_domain::{DomainName, RecordType, ResolutionMode, ResolutionSource};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const DEFAULT_HISTORY: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub domain: DomainName,
    pub record_type: RecordType,
    pub mode: ResolutionMode,
    pub source: ResolutionSource,
    pub duration_ms: f64,
    /// `success` for an Answer, otherwise the outcome or error kind.
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl QueryRecord {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSummary {
    pub total_queries: u64,
    pub successes: u64,
    pub failures: u64,
    pub average_latency_ms: f64,
    /// Newest first.
    pub recent: Vec<QueryRecord>,
}

#[derive(Default)]
struct MetricsState {
    history: VecDeque<QueryRecord>,
    total: u64,
    successes: u64,
    failures: u64,
    total_latency_ms: f64,
}

/// Bounded in-memory history of resolutions plus lifetime counters.
pub struct QueryMetrics {
    state: Mutex<MetricsState>,
    max_history: usize,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    pub fn with_history(max_history: usize) -> Self {
        Self {
            state: Mutex::new(MetricsState::default()),
            max_history: max_history.max(1),
        }
    }

    pub fn record(&self, record: QueryRecord) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.total += 1;
        if record.is_success() {
            state.successes += 1;
        } else {
            state.failures += 1;
        }
        state.total_latency_ms += record.duration_ms;

        if state.history.len() == self.max_history {
            state.history.pop_front();
        }
        state.history.push_back(record);
    }

    pub fn summary(&self, recent_limit: usize) -> MetricsSummary {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let average_latency_ms = if state.total == 0 {
            0.0
        } else {
            state.total_latency_ms / state.total as f64
        };

        MetricsSummary {
            total_queries: state.total,
            successes: state.successes,
            failures: state.failures,
            average_latency_ms,
            recent: state.history.iter().rev().take(recent_limit).cloned().collect(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .history
            .len()
    }
}

impl Default for QueryMetrics {
    fn default() -> Self {
        Self::new()
    }
}
