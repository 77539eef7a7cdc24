use crate::dns::transport::https::HttpsTransport;
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use crate::dns::wire::{decode_message, encode_query, DnsMessage, Header};
use dnscope_application::ports::QueryPacket;
use dnscope_domain::{DomainError, DomainName, RecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Runs single query/response round trips with bounded retries.
///
/// Timeouts, network failures, undecodable replies and id mismatches are
/// retried up to `retries` more times. A reply with TC set is repeated over
/// TCP before it is handed back.
pub struct UpstreamExchanger {
    timeout: Duration,
    retries: u32,
}

impl UpstreamExchanger {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    pub async fn query(
        &self,
        server: SocketAddr,
        domain: &DomainName,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<DnsMessage, DomainError> {
        let packet = encode_query(domain, record_type, recursion_desired)?;
        self.exchange(server, &packet).await
    }

    pub async fn exchange(
        &self,
        server: SocketAddr,
        packet: &QueryPacket,
    ) -> Result<DnsMessage, DomainError> {
        let mut attempt = 0;
        loop {
            match self.round_trip(server, packet).await {
                Ok(message) => return Ok(message),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    debug!(
                        server = %server,
                        attempt = attempt,
                        error = %e,
                        "Retrying DNS round trip"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Raw reply bytes for inspection; no decoding or TC handling.
    pub async fn exchange_raw(
        &self,
        server: SocketAddr,
        packet: &QueryPacket,
    ) -> Result<Vec<u8>, DomainError> {
        let mut attempt = 0;
        loop {
            match UdpTransport::new(server).send(&packet.bytes, self.timeout).await {
                Ok(response) => return Ok(response.bytes),
                Err(e) if e.is_retryable() && attempt < self.retries => attempt += 1,
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn query_https(
        &self,
        transport: &HttpsTransport,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<DnsMessage, DomainError> {
        // RFC 8484 §4.1: DoH queries carry id 0.
        let mut packet = encode_query(domain, record_type, true)?;
        packet.id = 0;
        packet.bytes[..2].copy_from_slice(&[0, 0]);

        let mut attempt = 0;
        loop {
            let result = match transport.send(&packet.bytes, self.timeout).await {
                Ok(response) => validate(&response.bytes, packet.id, transport.url()),
                Err(e) => Err(e),
            };
            match result {
                Ok(message) => return Ok(message),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    debug!(url = %transport.url(), attempt = attempt, error = %e, "Retrying DoH query");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn round_trip(
        &self,
        server: SocketAddr,
        packet: &QueryPacket,
    ) -> Result<DnsMessage, DomainError> {
        let response = UdpTransport::new(server)
            .send(&packet.bytes, self.timeout)
            .await?;

        // A truncated reply may end mid-record, so TC is read from the header
        // before the sections are decoded.
        let truncated = Header::peek(&response.bytes)
            .is_some_and(|header| header.id == packet.id && header.qr && header.tc);
        if !truncated {
            return validate(&response.bytes, packet.id, server);
        }

        debug!(server = %server, id = packet.id, "Truncated UDP reply, retrying over TCP");
        let response = TcpTransport::new(server)
            .send(&packet.bytes, self.timeout)
            .await?;
        let message = validate(&response.bytes, packet.id, server)?;
        if message.header.tc {
            warn!(server = %server, "TC set on TCP reply, using it as-is");
        }
        Ok(message)
    }
}

fn validate(
    bytes: &[u8],
    expected_id: u16,
    server: impl std::fmt::Display,
) -> Result<DnsMessage, DomainError> {
    let message = decode_message(bytes)?;
    if message.header.id != expected_id {
        return Err(DomainError::MalformedPacket(format!(
            "transaction id mismatch from {}: expected {}, got {}",
            server, expected_id, message.header.id
        )));
    }
    if !message.header.qr {
        return Err(DomainError::MalformedPacket(format!(
            "reply from {} is not a response",
            server
        )));
    }
    Ok(message)
}
