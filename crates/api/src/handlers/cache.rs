use crate::{
    dto::{CacheClearedResponse, CacheEntryDto, CacheResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache")]
pub async fn get_cache(State(state): State<AppState>) -> Json<CacheResponse> {
    let snapshot = state.get_cache_snapshot.execute();

    debug!(
        size = snapshot.stats.size,
        hits = snapshot.stats.hits,
        misses = snapshot.stats.misses,
        "Cache snapshot retrieved"
    );

    Json(CacheResponse {
        stats: snapshot.stats.into(),
        entries: snapshot
            .entries
            .into_iter()
            .map(CacheEntryDto::from)
            .collect(),
    })
}

#[instrument(skip(state), name = "api_clear_cache")]
pub async fn clear_cache(State(state): State<AppState>) -> Json<CacheClearedResponse> {
    let removed = state.clear_cache.execute();
    Json(CacheClearedResponse {
        message: format!("Cache cleared ({} entries removed)", removed),
        removed,
    })
}
