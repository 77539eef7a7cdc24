use crate::dns::exchange::UpstreamExchanger;
use crate::dns::wire::{encode_query, hex_dump};
use async_trait::async_trait;
use dnscope_application::ports::{PacketPort, QueryPacket};
use dnscope_domain::{DomainError, DomainName, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;

/// Packet inspection over the real codec. Sent packets go to the system
/// upstream and the reply is returned undecoded.
pub struct WirePacketAdapter {
    exchanger: Arc<UpstreamExchanger>,
    upstream: SocketAddr,
}

impl WirePacketAdapter {
    pub fn new(exchanger: Arc<UpstreamExchanger>, upstream: SocketAddr) -> Self {
        Self {
            exchanger,
            upstream,
        }
    }
}

#[async_trait]
impl PacketPort for WirePacketAdapter {
    fn build_query(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<QueryPacket, DomainError> {
        encode_query(domain, record_type, recursion_desired)
    }

    fn hex_dump(&self, bytes: &[u8]) -> String {
        hex_dump(bytes)
    }

    async fn send(&self, packet: &QueryPacket) -> Result<Vec<u8>, DomainError> {
        self.exchanger.exchange_raw(self.upstream, packet).await
    }
}
