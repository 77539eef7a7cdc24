#![allow(dead_code)]
use async_trait::async_trait;
use dnscope_application::ports::DnsResolver;
use dnscope_domain::{
    DnsQuery, DomainError, DomainName, RecordData, Resolution, ResolutionOutcome, ResourceRecord,
};
use dnscope_infrastructure::dns::wire::{DnsMessage, RCODE_NOERROR};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

pub fn name(raw: &str) -> DomainName {
    DomainName::parse(raw).unwrap()
}

pub fn a(owner: &str, ttl: u32, addr: Ipv4Addr) -> ResourceRecord {
    ResourceRecord::new(name(owner), ttl, RecordData::A(addr))
}

pub fn ns(zone: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name(zone), 3600, RecordData::Ns(name(target)))
}

/// NOERROR reply carrying `answers`.
pub fn answer(request: &DnsMessage, answers: Vec<ResourceRecord>) -> DnsMessage {
    let mut response = DnsMessage::response_to(request, RCODE_NOERROR);
    response.header.aa = true;
    response.answers = answers;
    response
}

/// Non-authoritative referral with optional glue.
pub fn referral(
    request: &DnsMessage,
    authority: Vec<ResourceRecord>,
    glue: Vec<ResourceRecord>,
) -> DnsMessage {
    let mut response = DnsMessage::response_to(request, RCODE_NOERROR);
    response.header.ra = false;
    response.authority = authority;
    response.additional = glue;
    response
}

pub fn qname(request: &DnsMessage) -> String {
    request
        .questions
        .first()
        .map(|q| q.name.as_str().to_string())
        .unwrap_or_default()
}

/// Resolver returning fixed outcomes per domain; unknown names fail with a
/// network error.
#[derive(Default)]
pub struct StaticResolver {
    outcomes: Mutex<HashMap<String, ResolutionOutcome>>,
}

impl StaticResolver {
    pub fn with(self, domain: &str, outcome: ResolutionOutcome) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(domain.to_string(), outcome);
        self
    }
}

#[async_trait]
impl DnsResolver for StaticResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .get(query.domain.as_str())
            .cloned()
            .ok_or_else(|| DomainError::network("static", "no scripted outcome"))?;
        Ok(Resolution::new(outcome, query.mode))
    }
}
