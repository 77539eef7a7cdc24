use crate::dns_query::ResolutionMode;
use crate::dns_record::record_type::{TYPE_DNSKEY, TYPE_DS, TYPE_RRSIG};
use crate::dns_record::ResourceRecord;
use serde::Serialize;

/// Terminal result of a resolution that reached a server and got a
/// classifiable reply. Transport failures are `DomainError`s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// rcode 0. `records` may be empty (NODATA).
    Answer { records: Vec<ResourceRecord> },
    /// rcode 3.
    NameError,
    /// rcode 2 and every other non-zero rcode.
    ServerFailure { rcode: u8 },
    /// Hop budget exhausted or a (server, name) pair was revisited.
    DelegationLoop { hops: u32 },
}

impl ResolutionOutcome {
    pub fn from_rcode(rcode: u8, records: Vec<ResourceRecord>) -> Self {
        match rcode {
            0 => ResolutionOutcome::Answer { records },
            3 => ResolutionOutcome::NameError,
            other => ResolutionOutcome::ServerFailure { rcode: other },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionOutcome::Answer { .. } => "Answer",
            ResolutionOutcome::NameError => "NameError",
            ResolutionOutcome::ServerFailure { .. } => "ServerFailure",
            ResolutionOutcome::DelegationLoop { .. } => "DelegationLoop",
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, ResolutionOutcome::Answer { .. })
    }

    pub fn records(&self) -> &[ResourceRecord] {
        match self {
            ResolutionOutcome::Answer { records } => records,
            _ => &[],
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ResolutionOutcome::Answer { records } => format!("{} record(s)", records.len()),
            ResolutionOutcome::NameError => "domain does not exist (NXDOMAIN)".to_string(),
            ResolutionOutcome::ServerFailure { rcode } => {
                format!("server failure (rcode {})", rcode)
            }
            ResolutionOutcome::DelegationLoop { hops } => {
                format!("delegation loop after {} hop(s)", hops)
            }
        }
    }
}

/// Presence of DNSSEC material in a response. Nothing is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DnssecInfo {
    pub has_rrsig: bool,
    pub has_ds: bool,
    pub has_dnskey: bool,
}

impl DnssecInfo {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ResourceRecord>,
    {
        let mut info = Self::default();
        for record in records {
            match record.type_code() {
                TYPE_RRSIG => info.has_rrsig = true,
                TYPE_DS => info.has_ds = true,
                TYPE_DNSKEY => info.has_dnskey = true,
                _ => {}
            }
        }
        info
    }

    pub fn merge(self, other: DnssecInfo) -> Self {
        Self {
            has_rrsig: self.has_rrsig || other.has_rrsig,
            has_ds: self.has_ds || other.has_ds,
            has_dnskey: self.has_dnskey || other.has_dnskey,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Cache,
    Network,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Network => "network",
        }
    }
}

/// What a resolver hands back for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: ResolutionOutcome,
    pub mode_used: ResolutionMode,
    /// Last server that produced the outcome, if any.
    pub server: Option<String>,
    pub hops: u32,
    pub dnssec: DnssecInfo,
}

impl Resolution {
    pub fn new(outcome: ResolutionOutcome, mode_used: ResolutionMode) -> Self {
        Self {
            outcome,
            mode_used,
            server: None,
            hops: 0,
            dnssec: DnssecInfo::default(),
        }
    }

    pub fn with_server(mut self, server: impl ToString) -> Self {
        self.server = Some(server.to_string());
        self
    }

    pub fn with_hops(mut self, hops: u32) -> Self {
        self.hops = hops;
        self
    }

    pub fn with_dnssec(mut self, dnssec: DnssecInfo) -> Self {
        self.dnssec = dnssec;
        self
    }
}
