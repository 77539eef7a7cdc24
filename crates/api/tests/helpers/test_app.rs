#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use dnscope_api::{create_api_routes, AppState};
use dnscope_application::ports::{DnsResolver, PacketPort, QueryPacket};
use dnscope_application::services::QueryMetrics;
use dnscope_application::use_cases::{
    BenchmarkSettings, BuildPacketUseCase, ClearCacheUseCase, GetCacheSnapshotUseCase,
    GetQueryMetricsUseCase, ResolveDomainUseCase, RunBenchmarkUseCase,
};
use dnscope_domain::{
    DnsQuery, DomainError, DomainName, RecordData, RecordType, Resolution, ResolutionMode,
    ResolutionOutcome, ResourceRecord,
};
use dnscope_infrastructure::dns::RecordCache;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub fn a_record(domain: &str, ttl: u32, addr: Ipv4Addr) -> ResourceRecord {
    ResourceRecord::new(DomainName::parse(domain).unwrap(), ttl, RecordData::A(addr))
}

/// Resolver returning scripted results per domain; unscripted domains
/// resolve to 192.0.2.1 with ttl 60.
#[derive(Default)]
pub struct ScriptedResolver {
    results: Mutex<HashMap<String, Result<ResolutionOutcome, DomainError>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<DnsQuery>>,
}

impl ScriptedResolver {
    pub fn script(&self, domain: &str, result: Result<ResolutionOutcome, DomainError>) {
        self.results
            .lock()
            .unwrap()
            .insert(domain.to_string(), result);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<DnsQuery> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DnsResolver for ScriptedResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(query.clone());

        let scripted = self
            .results
            .lock()
            .unwrap()
            .get(query.domain.as_str())
            .cloned();
        let outcome = match scripted {
            Some(result) => result?,
            None => ResolutionOutcome::Answer {
                records: vec![a_record(query.domain.as_str(), 60, Ipv4Addr::new(192, 0, 2, 1))],
            },
        };
        Ok(Resolution::new(outcome, query.mode).with_server("192.0.2.53:53"))
    }
}

pub struct FixedPacketPort;

#[async_trait]
impl PacketPort for FixedPacketPort {
    fn build_query(
        &self,
        _domain: &DomainName,
        _record_type: RecordType,
        _recursion_desired: bool,
    ) -> Result<QueryPacket, DomainError> {
        Ok(QueryPacket {
            id: 0x1234,
            bytes: vec![0x12, 0x34, 0x01, 0x00],
        })
    }

    fn hex_dump(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn send(&self, _packet: &QueryPacket) -> Result<Vec<u8>, DomainError> {
        Ok(vec![0xAB, 0xCD])
    }
}

pub struct TestApp {
    pub router: Router,
    pub resolver: Arc<ScriptedResolver>,
    pub cache: Arc<RecordCache>,
}

pub fn build_app(benchmark_domains: &[&str]) -> TestApp {
    let resolver = Arc::new(ScriptedResolver::default());
    let cache = Arc::new(RecordCache::new(100));
    let metrics = Arc::new(QueryMetrics::new());

    let resolve = Arc::new(ResolveDomainUseCase::new(
        resolver.clone(),
        cache.clone(),
        metrics.clone(),
    ));
    let settings = BenchmarkSettings {
        domains: benchmark_domains
            .iter()
            .map(|d| DomainName::parse(d).unwrap())
            .collect(),
        record_type: RecordType::A,
        local_mode: ResolutionMode::System,
        google: "8.8.8.8:53".parse().unwrap(),
        cloudflare: "1.1.1.1:53".parse().unwrap(),
        timeout: Duration::from_secs(2),
        workers: 4,
        cooldown: Duration::from_secs(60),
    };

    let state = AppState {
        resolve: resolve.clone(),
        build_packet: Arc::new(BuildPacketUseCase::new(Arc::new(FixedPacketPort))),
        get_cache_snapshot: Arc::new(GetCacheSnapshotUseCase::new(cache.clone())),
        clear_cache: Arc::new(ClearCacheUseCase::new(cache.clone())),
        run_benchmark: Arc::new(RunBenchmarkUseCase::new(resolve, settings)),
        get_metrics: Arc::new(GetQueryMetricsUseCase::new(metrics)),
        default_mode: ResolutionMode::System,
    };

    TestApp {
        router: create_api_routes(state),
        resolver,
        cache,
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
