use crate::ports::PacketPort;
use dnscope_domain::{DomainError, DomainName, RecordType};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketInspection {
    pub transaction_id: u16,
    pub length: usize,
    pub hex_dump: String,
    pub response_length: Option<usize>,
    pub response_hex_dump: Option<String>,
}

pub struct BuildPacketUseCase {
    packets: Arc<dyn PacketPort>,
}

impl BuildPacketUseCase {
    pub fn new(packets: Arc<dyn PacketPort>) -> Self {
        Self { packets }
    }

    /// Builds a recursive query for inspection; with `send` it is also
    /// exchanged with the default upstream and the reply is dumped as well.
    pub async fn execute(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        send: bool,
    ) -> Result<PacketInspection, DomainError> {
        let packet = self.packets.build_query(domain, record_type, true)?;
        debug!(
            domain = %domain,
            record_type = %record_type,
            id = packet.id,
            length = packet.bytes.len(),
            "Built query packet"
        );

        let mut inspection = PacketInspection {
            transaction_id: packet.id,
            length: packet.bytes.len(),
            hex_dump: self.packets.hex_dump(&packet.bytes),
            response_length: None,
            response_hex_dump: None,
        };

        if send {
            let response = self.packets.send(&packet).await?;
            inspection.response_length = Some(response.len());
            inspection.response_hex_dump = Some(self.packets.hex_dump(&response));
        }

        Ok(inspection)
    }
}
