pub mod benchmark;
pub mod cache;
pub mod dns;
pub mod metrics;

pub use benchmark::{BenchmarkSettings, RunBenchmarkUseCase};
pub use cache::{ClearCacheUseCase, GetCacheSnapshotUseCase};
pub use dns::{BuildPacketUseCase, PacketInspection, ResolveDomainUseCase, ResolveResult};
pub use metrics::GetQueryMetricsUseCase;
