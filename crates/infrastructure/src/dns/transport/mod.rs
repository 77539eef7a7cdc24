pub mod https;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dnscope_domain::DomainError;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
}

/// One request/response exchange over a specific transport. `timeout`
/// bounds each network wait independently.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
