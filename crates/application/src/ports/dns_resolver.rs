use async_trait::async_trait;
use dnscope_domain::{DnsQuery, DomainError, Resolution};

/// Network-facing resolution. Implementations never touch the cache; the
/// resolve use case owns cache interaction.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError>;
}
