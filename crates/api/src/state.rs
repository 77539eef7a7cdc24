use dnscope_application::use_cases::{
    BuildPacketUseCase, ClearCacheUseCase, GetCacheSnapshotUseCase, GetQueryMetricsUseCase,
    ResolveDomainUseCase, RunBenchmarkUseCase,
};
use dnscope_domain::ResolutionMode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolve: Arc<ResolveDomainUseCase>,
    pub build_packet: Arc<BuildPacketUseCase>,
    pub get_cache_snapshot: Arc<GetCacheSnapshotUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
    pub run_benchmark: Arc<RunBenchmarkUseCase>,
    pub get_metrics: Arc<GetQueryMetricsUseCase>,
    /// Used when a resolve request names no mode and no upstream.
    pub default_mode: ResolutionMode,
}
