use super::iterative::IterativeResolver;
use crate::dns::exchange::UpstreamExchanger;
use crate::dns::transport::https::HttpsTransport;
use crate::dns::wire::DnsMessage;
use async_trait::async_trait;
use dnscope_application::ports::DnsResolver;
use dnscope_domain::config::ResolverConfig;
use dnscope_domain::{
    DnsQuery, DnssecInfo, DomainError, Resolution, ResolutionMode, ResolutionOutcome,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const AUTO_ORDER: [ResolutionMode; 3] = [
    ResolutionMode::Iterative,
    ResolutionMode::System,
    ResolutionMode::Doh,
];

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub system_upstream: SocketAddr,
    pub recursive_upstream: SocketAddr,
    pub root_hints: Vec<IpAddr>,
    pub nameserver_port: u16,
    pub query_timeout: Duration,
    pub retries: u32,
    pub max_hops: u32,
    pub doh_url: String,
}

impl ResolverSettings {
    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        Ok(Self {
            system_upstream: config.system_upstream_addr()?,
            recursive_upstream: config.recursive_upstream_addr()?,
            root_hints: config.root_hints.clone(),
            nameserver_port: config.nameserver_port,
            query_timeout: config.query_timeout(),
            retries: config.retries,
            max_hops: config.max_hops,
            doh_url: config.doh_url.clone(),
        })
    }
}

/// Network resolution for every mode. Cache handling lives in the resolve
/// use case, so each call here goes to the wire.
pub struct CoreResolver {
    exchanger: Arc<UpstreamExchanger>,
    system_upstream: SocketAddr,
    recursive_upstream: SocketAddr,
    iterative: IterativeResolver,
    doh: HttpsTransport,
}

impl CoreResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        info!(
            system = %settings.system_upstream,
            recursive = %settings.recursive_upstream,
            root_hints = settings.root_hints.len(),
            timeout_ms = settings.query_timeout.as_millis() as u64,
            retries = settings.retries,
            "Core DNS resolver created"
        );

        let exchanger = Arc::new(UpstreamExchanger::new(
            settings.query_timeout,
            settings.retries,
        ));
        let iterative = IterativeResolver::new(
            Arc::clone(&exchanger),
            settings.root_hints,
            settings.nameserver_port,
            settings.max_hops,
        );

        Self {
            exchanger,
            system_upstream: settings.system_upstream,
            recursive_upstream: settings.recursive_upstream,
            iterative,
            doh: HttpsTransport::new(settings.doh_url),
        }
    }

    pub fn exchanger(&self) -> Arc<UpstreamExchanger> {
        Arc::clone(&self.exchanger)
    }

    async fn resolve_with(
        &self,
        mode: ResolutionMode,
        query: &DnsQuery,
    ) -> Result<Resolution, DomainError> {
        match mode {
            ResolutionMode::Auto => self.auto(query).await,
            single => self.resolve_single(single, query).await,
        }
    }

    async fn resolve_single(
        &self,
        mode: ResolutionMode,
        query: &DnsQuery,
    ) -> Result<Resolution, DomainError> {
        match mode {
            ResolutionMode::System => self.direct(self.system_upstream, query, mode).await,
            ResolutionMode::Recursive => {
                let upstream = query.upstream.unwrap_or(self.recursive_upstream);
                self.direct(upstream, query, mode).await
            }
            ResolutionMode::Iterative => {
                self.iterative
                    .resolve(&query.domain, query.record_type)
                    .await
            }
            ResolutionMode::Doh => {
                let message = self
                    .exchanger
                    .query_https(&self.doh, &query.domain, query.record_type)
                    .await?;
                Ok(classify(message, mode, self.doh.url()))
            }
            ResolutionMode::Auto => Err(DomainError::InvalidInput(
                "auto is not a single resolution mode".to_string(),
            )),
        }
    }

    async fn direct(
        &self,
        server: SocketAddr,
        query: &DnsQuery,
        mode: ResolutionMode,
    ) -> Result<Resolution, DomainError> {
        let message = self
            .exchanger
            .query(server, &query.domain, query.record_type, true)
            .await?;
        Ok(classify(message, mode, server))
    }

    /// First mode whose result is not a transport failure wins.
    async fn auto(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        let mut last_error = None;
        for mode in AUTO_ORDER {
            match self.resolve_single(mode, query).await {
                Ok(resolution) => return Ok(resolution),
                Err(e) if e.is_retryable() => {
                    warn!(
                        domain = %query.domain,
                        mode = %mode,
                        error = %e,
                        "Auto mode falling back"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error
            .unwrap_or_else(|| DomainError::network("auto", "no resolution mode available")))
    }
}

#[async_trait]
impl DnsResolver for CoreResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            mode = %query.mode,
            "CoreResolver: resolving"
        );

        let resolution = self.resolve_with(query.mode, query).await?;

        debug!(
            domain = %query.domain,
            outcome = resolution.outcome.kind(),
            mode_used = %resolution.mode_used,
            hops = resolution.hops,
            "CoreResolver: resolved"
        );
        Ok(resolution)
    }
}

/// Maps a response onto an outcome. rcode 0 is an Answer carrying the answer
/// section (possibly empty); other rcodes are semantic failures.
pub(crate) fn classify(
    message: DnsMessage,
    mode: ResolutionMode,
    server: impl ToString,
) -> Resolution {
    let dnssec = DnssecInfo::from_records(message.all_records());
    let outcome = ResolutionOutcome::from_rcode(message.header.rcode, message.answers);
    Resolution::new(outcome, mode)
        .with_server(server)
        .with_hops(1)
        .with_dnssec(dnssec)
}
