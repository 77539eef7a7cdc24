#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use dnscope_application::ports::{DnsCachePort, DnsResolver, PacketPort, QueryPacket};
use dnscope_domain::{
    CacheEntryView, CacheKey, CacheLookup, CacheSnapshot, CacheStats, CacheStatus, DnsQuery,
    DomainError, DomainName, RecordData, RecordType, Resolution, ResolutionMode,
    ResolutionOutcome, ResourceRecord,
};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn a_record(domain: &str, ip: &str, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(
        DomainName::parse(domain).unwrap(),
        ttl,
        RecordData::A(ip.parse::<Ipv4Addr>().unwrap()),
    )
}

pub fn answer(records: Vec<ResourceRecord>) -> Resolution {
    Resolution::new(ResolutionOutcome::Answer { records }, ResolutionMode::System)
        .with_server("192.0.2.53:53")
}

pub fn query(domain: &str, record_type: RecordType) -> DnsQuery {
    DnsQuery::new(
        DomainName::parse(domain).unwrap(),
        record_type,
        ResolutionMode::System,
    )
}

#[derive(Clone)]
struct ScriptedResponse {
    result: Result<Resolution, DomainError>,
    delay: Duration,
}

/// Resolver double keyed by (domain, upstream). An entry without upstream
/// matches any upstream.
#[derive(Clone, Default)]
pub struct MockDnsResolver {
    responses: Arc<Mutex<HashMap<(String, Option<SocketAddr>), ScriptedResponse>>>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<DnsQuery>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, resolution: Resolution) {
        self.script(domain, None, Ok(resolution), Duration::ZERO);
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.script(domain, None, Err(error), Duration::ZERO);
    }

    pub fn set_upstream_response(
        &self,
        domain: &str,
        upstream: SocketAddr,
        result: Result<Resolution, DomainError>,
        delay: Duration,
    ) {
        self.script(domain, Some(upstream), result, delay);
    }

    pub fn set_delayed_response(&self, domain: &str, resolution: Resolution, delay: Duration) {
        self.script(domain, None, Ok(resolution), delay);
    }

    fn script(
        &self,
        domain: &str,
        upstream: Option<SocketAddr>,
        result: Result<Resolution, DomainError>,
        delay: Duration,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((domain.to_string(), upstream), ScriptedResponse { result, delay });
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_queries(&self) -> Vec<DnsQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(query.clone());

        let scripted = {
            let responses = self.responses.lock().unwrap();
            let domain = query.domain.as_str().to_string();
            responses
                .get(&(domain.clone(), query.upstream))
                .or_else(|| responses.get(&(domain, None)))
                .cloned()
        };

        match scripted {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(DomainError::network(
                "mock",
                format!("no scripted response for {}", query.domain),
            )),
        }
    }
}

struct MockEntry {
    records: Vec<ResourceRecord>,
    ttl: u32,
    status: CacheStatus,
}

/// Map-backed cache that records every port call.
#[derive(Default)]
pub struct MockDnsCache {
    entries: Mutex<HashMap<CacheKey, MockEntry>>,
    lookups: AtomicUsize,
    stores: Mutex<Vec<(CacheKey, u32)>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl MockDnsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: CacheKey, records: Vec<ResourceRecord>, ttl: u32, status: CacheStatus) {
        self.entries.lock().unwrap().insert(
            key,
            MockEntry {
                records,
                ttl,
                status,
            },
        );
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn stores(&self) -> Vec<(CacheKey, u32)> {
        self.stores.lock().unwrap().clone()
    }
}

impl DnsCachePort for MockDnsCache {
    fn lookup(&self, key: &CacheKey) -> CacheLookup {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) => {
                if entry.status == CacheStatus::Valid {
                    self.hits.fetch_add(1, Ordering::SeqCst);
                } else {
                    self.misses.fetch_add(1, Ordering::SeqCst);
                }
                CacheLookup {
                    status: entry.status,
                    records: entry.records.clone(),
                    remaining_ttl: entry.ttl,
                }
            }
            None => {
                self.misses.fetch_add(1, Ordering::SeqCst);
                CacheLookup::absent()
            }
        }
    }

    fn store(&self, key: CacheKey, records: Vec<ResourceRecord>, ttl: u32) {
        self.stores.lock().unwrap().push((key.clone(), ttl));
        self.seed(key, records, ttl, CacheStatus::Valid);
    }

    fn clear(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.len();
        entries.clear();
        removed
    }

    fn snapshot(&self) -> CacheSnapshot {
        let entries = self.entries.lock().unwrap();
        CacheSnapshot {
            stats: CacheStats {
                hits: self.hits.load(Ordering::SeqCst) as u64,
                misses: self.misses.load(Ordering::SeqCst) as u64,
                size: entries.len(),
                capacity: 100,
                evictions: 0,
                insertions: self.stores.lock().unwrap().len() as u64,
            },
            entries: entries
                .iter()
                .map(|(key, entry)| CacheEntryView {
                    domain: key.domain.clone(),
                    record_type: key.record_type,
                    ttl: entry.ttl,
                    status: entry.status,
                })
                .collect(),
        }
    }

    fn compact(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.status == CacheStatus::Valid);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Packet port double: fixed id, echoes a canned reply when sending.
pub struct MockPacketPort {
    pub id: u16,
    pub reply: Result<Vec<u8>, DomainError>,
    sends: AtomicUsize,
}

impl MockPacketPort {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            reply: Ok(vec![0xAB, 0xCD]),
            sends: AtomicUsize::new(0),
        }
    }

    pub fn with_reply(mut self, reply: Result<Vec<u8>, DomainError>) -> Self {
        self.reply = reply;
        self
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PacketPort for MockPacketPort {
    fn build_query(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        _recursion_desired: bool,
    ) -> Result<QueryPacket, DomainError> {
        let mut bytes = self.id.to_be_bytes().to_vec();
        bytes.extend_from_slice(domain.as_str().as_bytes());
        bytes.extend_from_slice(&record_type.to_u16().to_be_bytes());
        Ok(QueryPacket { id: self.id, bytes })
    }

    fn hex_dump(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn send(&self, _packet: &QueryPacket) -> Result<Vec<u8>, DomainError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}
