mod clear_cache;
mod get_snapshot;

pub use clear_cache::ClearCacheUseCase;
pub use get_snapshot::GetCacheSnapshotUseCase;
