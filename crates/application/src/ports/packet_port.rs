use async_trait::async_trait;
use dnscope_domain::{DomainError, DomainName, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPacket {
    pub id: u16,
    pub bytes: Vec<u8>,
}

/// Wire-level access used for packet inspection.
#[async_trait]
pub trait PacketPort: Send + Sync {
    fn build_query(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<QueryPacket, DomainError>;

    fn hex_dump(&self, bytes: &[u8]) -> String;

    /// Sends the packet to the default upstream and returns the raw reply.
    async fn send(&self, packet: &QueryPacket) -> Result<Vec<u8>, DomainError>;
}
