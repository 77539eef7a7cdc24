use crate::use_cases::dns::ResolveDomainUseCase;
use dnscope_domain::{
    BenchmarkReport, BenchmarkRow, DnsQuery, DomainError, DomainName, RecordType, ResolutionMode,
    ResolutionOutcome, TargetLatency,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const NO_DOMAINS_MESSAGE: &str = "No benchmark domains configured. Add some to [benchmark].domains!";

#[derive(Debug, Clone)]
pub struct BenchmarkSettings {
    pub domains: Vec<DomainName>,
    pub record_type: RecordType,
    pub local_mode: ResolutionMode,
    pub google: SocketAddr,
    pub cloudflare: SocketAddr,
    pub timeout: Duration,
    pub workers: usize,
    pub cooldown: Duration,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Local,
    Google,
    Cloudflare,
}

/// Latency comparison between the local resolution path and two public
/// resolvers. Every (domain, target) pair is its own task with its own
/// deadline; a semaphore caps how many run at once.
pub struct RunBenchmarkUseCase {
    resolve: Arc<ResolveDomainUseCase>,
    settings: BenchmarkSettings,
    last_run: Mutex<Option<Instant>>,
}

impl RunBenchmarkUseCase {
    pub fn new(resolve: Arc<ResolveDomainUseCase>, settings: BenchmarkSettings) -> Self {
        Self {
            resolve,
            settings,
            last_run: Mutex::new(None),
        }
    }

    pub async fn execute(&self) -> BenchmarkReport {
        if self.settings.domains.is_empty() {
            return BenchmarkReport::Declined(NO_DOMAINS_MESSAGE.to_string());
        }
        if let Some(wait) = self.claim_run_slot() {
            info!(retry_after_secs = wait.as_secs_f64(), "Benchmark declined, cooling down");
            return BenchmarkReport::Declined(format!(
                "Benchmark is cooling down. Try again in {:.1}s.",
                wait.as_secs_f64()
            ));
        }

        info!(
            domains = self.settings.domains.len(),
            workers = self.settings.workers,
            "Starting benchmark"
        );

        let permits = Arc::new(Semaphore::new(self.settings.workers.max(1)));
        let mut tasks = JoinSet::new();

        for (index, domain) in self.settings.domains.iter().enumerate() {
            for target in [Target::Local, Target::Google, Target::Cloudflare] {
                let query = self.query_for(domain.clone(), target);
                let resolve = Arc::clone(&self.resolve);
                let permits = Arc::clone(&permits);
                let timeout = self.settings.timeout;

                tasks.spawn(async move {
                    let latency = match permits.acquire_owned().await {
                        Ok(_permit) => measure(&resolve, &query, target, timeout).await,
                        Err(_) => TargetLatency::Failed("worker pool closed".to_string()),
                    };
                    (index, target, latency)
                });
            }
        }

        let mut rows: Vec<BenchmarkRow> = self
            .settings
            .domains
            .iter()
            .map(|domain| BenchmarkRow {
                domain: domain.clone(),
                local: TargetLatency::TimedOut,
                google: TargetLatency::TimedOut,
                cloudflare: TargetLatency::TimedOut,
            })
            .collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, target, latency)) => {
                    let row = &mut rows[index];
                    match target {
                        Target::Local => row.local = latency,
                        Target::Google => row.google = latency,
                        Target::Cloudflare => row.cloudflare = latency,
                    }
                }
                Err(e) => warn!(error = %e, "Benchmark task aborted"),
            }
        }

        info!(rows = rows.len(), "Benchmark finished");
        BenchmarkReport::Rows(rows)
    }

    /// Returns the remaining cooldown when a run is not allowed yet;
    /// otherwise stamps the start of this run.
    fn claim_run_slot(&self) -> Option<Duration> {
        let mut last = self.last_run.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if let Some(previous) = *last {
            let elapsed = now.duration_since(previous);
            if elapsed < self.settings.cooldown {
                return Some(self.settings.cooldown - elapsed);
            }
        }
        *last = Some(now);
        None
    }

    fn query_for(&self, domain: DomainName, target: Target) -> DnsQuery {
        let record_type = self.settings.record_type;
        match target {
            Target::Local => DnsQuery::new(domain, record_type, self.settings.local_mode),
            Target::Google => DnsQuery::new(domain, record_type, ResolutionMode::Recursive)
                .with_upstream(self.settings.google)
                .bypassing_cache(),
            Target::Cloudflare => DnsQuery::new(domain, record_type, ResolutionMode::Recursive)
                .with_upstream(self.settings.cloudflare)
                .bypassing_cache(),
        }
    }
}

async fn measure(
    resolve: &ResolveDomainUseCase,
    query: &DnsQuery,
    target: Target,
    timeout: Duration,
) -> TargetLatency {
    let start = Instant::now();
    let result = tokio::time::timeout(timeout, resolve.execute(query)).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let latency = match (target, result) {
        (_, Err(_)) => TargetLatency::TimedOut,
        (Target::Local, Ok(Ok(result))) => match result.outcome {
            ResolutionOutcome::Answer { .. } | ResolutionOutcome::NameError => {
                TargetLatency::Millis(elapsed_ms)
            }
            other => TargetLatency::Failed(other.describe()),
        },
        (Target::Local, Ok(Err(DomainError::Timeout { .. }))) => TargetLatency::TimedOut,
        (Target::Local, Ok(Err(e))) => TargetLatency::Failed(e.to_string()),
        (_, Ok(Ok(_))) => TargetLatency::Millis(elapsed_ms),
        (_, Ok(Err(_))) => TargetLatency::TimedOut,
    };

    debug!(
        domain = %query.domain,
        target = ?target,
        latency = ?latency,
        "Benchmark target measured"
    );
    latency
}
