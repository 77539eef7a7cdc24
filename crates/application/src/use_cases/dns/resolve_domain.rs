use crate::ports::{DnsCachePort, DnsResolver};
use crate::services::{QueryMetrics, QueryRecord};
use dnscope_domain::{
    CacheKey, DnsQuery, DnssecInfo, DomainError, ResolutionMode, ResolutionOutcome,
    ResolutionSource,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub outcome: ResolutionOutcome,
    pub source: ResolutionSource,
    pub mode: ResolutionMode,
    pub server: Option<String>,
    pub dnssec: DnssecInfo,
    pub duration: Duration,
}

impl ResolveResult {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Cache-first resolution: one lookup before any network activity and at
/// most one store after an Answer carrying records.
pub struct ResolveDomainUseCase {
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<dyn DnsCachePort>,
    metrics: Arc<QueryMetrics>,
}

impl ResolveDomainUseCase {
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        cache: Arc<dyn DnsCachePort>,
        metrics: Arc<QueryMetrics>,
    ) -> Self {
        Self {
            resolver,
            cache,
            metrics,
        }
    }

    pub async fn execute(&self, query: &DnsQuery) -> Result<ResolveResult, DomainError> {
        let start = Instant::now();
        let key = CacheKey::new(query.domain.clone(), query.record_type);

        if !query.skip_cache {
            let lookup = self.cache.lookup(&key);
            if lookup.is_valid() {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    remaining_ttl = lookup.remaining_ttl,
                    "Cache HIT"
                );
                let records: Vec<_> = lookup
                    .records
                    .into_iter()
                    .map(|r| r.with_ttl(lookup.remaining_ttl))
                    .collect();
                let result = ResolveResult {
                    dnssec: DnssecInfo::from_records(&records),
                    outcome: ResolutionOutcome::Answer { records },
                    source: ResolutionSource::Cache,
                    mode: query.mode,
                    server: None,
                    duration: start.elapsed(),
                };
                self.record(query, &result);
                return Ok(result);
            }
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                status = lookup.status.as_str(),
                "Cache MISS"
            );
        }

        match self.resolver.resolve(query).await {
            Ok(resolution) => {
                if !query.skip_cache {
                    self.store_answer(key, &resolution.outcome);
                }
                let result = ResolveResult {
                    outcome: resolution.outcome,
                    source: ResolutionSource::Network,
                    mode: resolution.mode_used,
                    server: resolution.server,
                    dnssec: resolution.dnssec,
                    duration: start.elapsed(),
                };
                self.record(query, &result);
                Ok(result)
            }
            Err(e) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    mode = %query.mode,
                    error = %e,
                    "Resolution failed"
                );
                self.metrics.record(QueryRecord {
                    domain: query.domain.clone(),
                    record_type: query.record_type,
                    mode: query.mode,
                    source: ResolutionSource::Network,
                    duration_ms: start.elapsed().as_secs_f64() * 1000.0,
                    status: e.kind().to_string(),
                    timestamp: chrono::Utc::now(),
                });
                Err(e)
            }
        }
    }

    fn store_answer(&self, key: CacheKey, outcome: &ResolutionOutcome) {
        let ResolutionOutcome::Answer { records } = outcome else {
            return;
        };
        let Some(min_ttl) = records.iter().map(|r| r.ttl).min() else {
            return;
        };
        if min_ttl == 0 {
            debug!(key = %key, "Answer carries ttl 0, not cached");
            return;
        }
        debug!(key = %key, ttl = min_ttl, records = records.len(), "Caching answer");
        self.cache.store(key, records.clone(), min_ttl);
    }

    fn record(&self, query: &DnsQuery, result: &ResolveResult) {
        let status = match &result.outcome {
            ResolutionOutcome::Answer { .. } => "success".to_string(),
            other => other.kind().to_string(),
        };
        self.metrics.record(QueryRecord {
            domain: query.domain.clone(),
            record_type: query.record_type,
            mode: result.mode,
            source: result.source,
            duration_ms: result.duration_ms(),
            status,
            timestamp: chrono::Utc::now(),
        });
    }
}
