use crate::dns::exchange::UpstreamExchanger;
use crate::dns::wire::DnsMessage;
use dnscope_domain::{
    DnssecInfo, DomainError, DomainName, RecordData, RecordType, Resolution, ResolutionMode,
    ResolutionOutcome,
};
use std::collections::{HashSet, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::debug;

/// One name being chased down the delegation tree. The bottom frame is the
/// caller's question; frames above it look up addresses of glue-less
/// nameservers for the frame below.
struct Frame {
    name: DomainName,
    record_type: RecordType,
    servers: VecDeque<IpAddr>,
    pending_ns: VecDeque<DomainName>,
}

impl Frame {
    fn new(name: DomainName, record_type: RecordType, servers: Vec<IpAddr>) -> Self {
        Self {
            name,
            record_type,
            servers: servers.into(),
            pending_ns: VecDeque::new(),
        }
    }
}

enum Step {
    Final(ResolutionOutcome),
    Referral {
        glue: Vec<IpAddr>,
        unresolved: Vec<DomainName>,
    },
}

/// Resolves from the root hints with non-recursive queries.
pub struct IterativeResolver {
    exchanger: Arc<UpstreamExchanger>,
    root_hints: Vec<IpAddr>,
    port: u16,
    max_hops: u32,
}

impl IterativeResolver {
    pub fn new(
        exchanger: Arc<UpstreamExchanger>,
        root_hints: Vec<IpAddr>,
        port: u16,
        max_hops: u32,
    ) -> Self {
        Self {
            exchanger,
            root_hints,
            port,
            max_hops,
        }
    }

    fn shuffled_roots(&self) -> Vec<IpAddr> {
        let mut roots = self.root_hints.clone();
        fastrand::shuffle(&mut roots);
        roots
    }

    /// Every query sent counts against `max_hops`, including the ones made
    /// while looking up nameserver addresses. A repeated
    /// (server, name, type) triple ends the walk as a delegation loop.
    pub async fn resolve(
        &self,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<Resolution, DomainError> {
        let mut stack = vec![Frame::new(
            domain.clone(),
            record_type,
            self.shuffled_roots(),
        )];
        let mut visited: HashSet<(IpAddr, DomainName, RecordType)> = HashSet::new();
        let mut hops: u32 = 0;
        let mut dnssec = DnssecInfo::default();
        let mut last_error: Option<DomainError> = None;

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let name = frame.name.clone();
            let qtype = frame.record_type;

            let Some(ip) = frame.servers.pop_front() else {
                if let Some(ns_name) = frame.pending_ns.pop_front() {
                    debug!(nameserver = %ns_name, for_name = %name, "Resolving glue-less nameserver");
                    stack.push(Frame::new(ns_name, RecordType::A, self.shuffled_roots()));
                    continue;
                }
                if depth > 1 {
                    debug!(name = %name, "Nameserver lookup exhausted its servers");
                    stack.pop();
                    continue;
                }
                break;
            };

            if !visited.insert((ip, name.clone(), qtype)) {
                debug!(server = %ip, name = %name, hops = hops, "Delegation revisits a server");
                return Ok(delegation_loop(hops, dnssec));
            }
            if hops >= self.max_hops {
                debug!(name = %name, hops = hops, "Delegation hop budget exhausted");
                return Ok(delegation_loop(hops, dnssec));
            }
            hops += 1;

            let server = SocketAddr::new(ip, self.port);
            let message = match self.exchanger.query(server, &name, qtype, false).await {
                Ok(message) => message,
                Err(e) => {
                    debug!(server = %server, name = %name, error = %e, "Nameserver query failed");
                    last_error = Some(e);
                    continue;
                }
            };
            dnssec = dnssec.merge(DnssecInfo::from_records(message.all_records()));

            match interpret(message, &name) {
                Step::Final(outcome) if depth == 1 => {
                    return Ok(Resolution::new(outcome, ResolutionMode::Iterative)
                        .with_server(server)
                        .with_hops(hops)
                        .with_dnssec(dnssec));
                }
                Step::Final(outcome) => {
                    let addresses = addresses_of(&outcome);
                    stack.pop();
                    if let Some(parent) = stack.last_mut() {
                        debug!(
                            nameserver = %name,
                            addresses = addresses.len(),
                            "Nameserver lookup finished"
                        );
                        parent.servers.extend(addresses);
                    }
                }
                Step::Referral { glue, unresolved } => {
                    debug!(
                        name = %name,
                        server = %server,
                        glue = glue.len(),
                        unresolved = unresolved.len(),
                        "Following referral"
                    );
                    if let Some(frame) = stack.last_mut() {
                        frame.servers = glue.into();
                        frame.pending_ns = unresolved.into();
                    }
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Resolution::new(
                ResolutionOutcome::ServerFailure { rcode: 2 },
                ResolutionMode::Iterative,
            )
            .with_hops(hops)
            .with_dnssec(dnssec)),
        }
    }
}

fn delegation_loop(hops: u32, dnssec: DnssecInfo) -> Resolution {
    Resolution::new(
        ResolutionOutcome::DelegationLoop { hops },
        ResolutionMode::Iterative,
    )
    .with_hops(hops)
    .with_dnssec(dnssec)
}

fn addresses_of(outcome: &ResolutionOutcome) -> Vec<IpAddr> {
    outcome
        .records()
        .iter()
        .filter_map(|record| match record.data {
            RecordData::A(addr) => Some(IpAddr::V4(addr)),
            _ => None,
        })
        .collect()
}

fn interpret(message: DnsMessage, name: &DomainName) -> Step {
    if message.header.rcode != 0 {
        return Step::Final(ResolutionOutcome::from_rcode(message.header.rcode, Vec::new()));
    }
    if !message.answers.is_empty() {
        return Step::Final(ResolutionOutcome::Answer {
            records: message.answers,
        });
    }

    let nameservers: Vec<DomainName> = message
        .authority
        .iter()
        .filter(|record| name.is_within(&record.name))
        .filter_map(|record| match &record.data {
            RecordData::Ns(target) => Some(target.clone()),
            _ => None,
        })
        .collect();

    if nameservers.is_empty() || message.header.aa {
        // NODATA
        return Step::Final(ResolutionOutcome::Answer {
            records: Vec::new(),
        });
    }

    let mut glue = Vec::new();
    let mut unresolved = Vec::new();
    for ns in nameservers {
        let addresses: Vec<IpAddr> = message
            .additional
            .iter()
            .filter(|record| record.name == ns)
            .filter_map(|record| match record.data {
                RecordData::A(addr) => Some(IpAddr::V4(addr)),
                _ => None,
            })
            .collect();
        if addresses.is_empty() {
            unresolved.push(ns);
        } else {
            glue.extend(addresses);
        }
    }

    Step::Referral { glue, unresolved }
}
