use dnscope_jobs::{CacheCompactionJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockCacheMaintenancePort;

#[tokio::test(start_paused = true)]
async fn test_compaction_runs_immediately_and_on_interval() {
    let mock = Arc::new(MockCacheMaintenancePort::removing(3));
    let job = Arc::new(CacheCompactionJob::new(mock.clone()).with_interval(60));

    let handle = job.start();
    sleep(Duration::from_secs(125)).await;

    assert_eq!(mock.compaction_call_count(), 3);
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_compaction_error_is_non_fatal() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    mock.set_should_fail(true);

    let handle = Arc::new(CacheCompactionJob::new(mock.clone()).with_interval(10)).start();
    sleep(Duration::from_secs(25)).await;

    assert!(
        mock.compaction_call_count() >= 2,
        "Job should keep ticking after a failed cycle"
    );
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_the_job() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let token = CancellationToken::new();
    let handle = Arc::new(
        CacheCompactionJob::new(mock.clone())
            .with_interval(60)
            .with_cancellation(token.clone()),
    )
    .start();

    sleep(Duration::from_secs(1)).await;
    token.cancel();
    handle.await.unwrap();

    let calls = mock.compaction_call_count();
    sleep(Duration::from_secs(300)).await;
    assert_eq!(mock.compaction_call_count(), calls);
}

#[tokio::test]
async fn test_zero_interval_disables_the_job() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let handle = Arc::new(CacheCompactionJob::new(mock.clone()).with_interval(0)).start();

    handle.await.unwrap();
    assert_eq!(mock.compaction_call_count(), 0);
}

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    assert!(JobRunner::new().start().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_job_runner_shares_shutdown_token() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let token = CancellationToken::new();

    let handles = JobRunner::new()
        .with_cache_compaction(CacheCompactionJob::new(mock.clone()).with_interval(30))
        .with_shutdown_token(token.clone())
        .start();
    assert_eq!(handles.len(), 1);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(mock.compaction_call_count(), 1);

    token.cancel();
    for handle in handles {
        handle.await.unwrap();
    }
}
