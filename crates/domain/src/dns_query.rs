use crate::dns_name::DomainName;
use crate::dns_record::RecordType;
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Single RD query to the configured default upstream.
    #[default]
    System,
    /// Walk the delegation chain from the root hints.
    Iterative,
    /// Single RD query to an explicitly chosen upstream.
    Recursive,
    /// DNS-over-HTTPS POST to the configured endpoint.
    Doh,
    /// Iterative, then system, then DoH until one produces an outcome.
    Auto,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::System => "system",
            ResolutionMode::Iterative => "iterative",
            ResolutionMode::Recursive => "recursive",
            ResolutionMode::Doh => "doh",
            ResolutionMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" | "forward" => Ok(ResolutionMode::System),
            "iterative" => Ok(ResolutionMode::Iterative),
            "recursive" => Ok(ResolutionMode::Recursive),
            "doh" => Ok(ResolutionMode::Doh),
            "auto" => Ok(ResolutionMode::Auto),
            other => Err(DomainError::InvalidInput(format!(
                "unknown resolution mode '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: DomainName,
    pub record_type: RecordType,
    pub mode: ResolutionMode,
    pub upstream: Option<SocketAddr>,
    /// When set, the cache is neither consulted nor populated.
    pub skip_cache: bool,
}

impl DnsQuery {
    pub fn new(domain: DomainName, record_type: RecordType, mode: ResolutionMode) -> Self {
        Self {
            domain,
            record_type,
            mode,
            upstream: None,
            skip_cache: false,
        }
    }

    pub fn with_upstream(mut self, upstream: SocketAddr) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn bypassing_cache(mut self) -> Self {
        self.skip_cache = true;
        self
    }
}
