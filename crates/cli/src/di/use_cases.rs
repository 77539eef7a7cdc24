use super::DnsServices;
use dnscope_api::AppState;
use dnscope_application::use_cases::{
    BenchmarkSettings, BuildPacketUseCase, ClearCacheUseCase, GetCacheSnapshotUseCase,
    GetQueryMetricsUseCase, ResolveDomainUseCase, RunBenchmarkUseCase,
};
use dnscope_domain::{Config, DomainName};
use std::sync::Arc;

pub struct UseCases {
    pub resolve: Arc<ResolveDomainUseCase>,
    pub build_packet: Arc<BuildPacketUseCase>,
    pub get_cache_snapshot: Arc<GetCacheSnapshotUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
    pub run_benchmark: Arc<RunBenchmarkUseCase>,
    pub get_metrics: Arc<GetQueryMetricsUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, dns: &DnsServices) -> anyhow::Result<Self> {
        let resolve = Arc::new(ResolveDomainUseCase::new(
            dns.resolver.clone(),
            dns.cache.clone(),
            dns.metrics.clone(),
        ));

        let benchmark = &config.benchmark;
        let settings = BenchmarkSettings {
            domains: benchmark
                .domains
                .iter()
                .map(|d| DomainName::parse(d))
                .collect::<Result<_, _>>()?,
            record_type: benchmark.record_type,
            local_mode: config.resolver.default_mode,
            google: benchmark.google_addr()?,
            cloudflare: benchmark.cloudflare_addr()?,
            timeout: benchmark.timeout(),
            workers: benchmark.workers,
            cooldown: benchmark.cooldown(),
        };

        Ok(Self {
            build_packet: Arc::new(BuildPacketUseCase::new(dns.packets.clone())),
            get_cache_snapshot: Arc::new(GetCacheSnapshotUseCase::new(dns.cache.clone())),
            clear_cache: Arc::new(ClearCacheUseCase::new(dns.cache.clone())),
            run_benchmark: Arc::new(RunBenchmarkUseCase::new(resolve.clone(), settings)),
            get_metrics: Arc::new(GetQueryMetricsUseCase::new(dns.metrics.clone())),
            resolve,
        })
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            resolve: self.resolve.clone(),
            build_packet: self.build_packet.clone(),
            get_cache_snapshot: self.get_cache_snapshot.clone(),
            clear_cache: self.clear_cache.clone(),
            run_benchmark: self.run_benchmark.clone(),
            get_metrics: self.get_metrics.clone(),
            default_mode: config.resolver.default_mode,
        }
    }
}
