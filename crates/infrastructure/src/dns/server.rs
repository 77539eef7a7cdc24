use crate::dns::wire::{
    decode_message, encode_message, DnsMessage, Header, RCODE_FORMERR, RCODE_NOERROR,
    RCODE_NOTIMP, RCODE_NXDOMAIN, RCODE_SERVFAIL,
};
use dnscope_application::use_cases::ResolveDomainUseCase;
use dnscope_domain::{DnsQuery, DomainError, RecordType, ResolutionMode, ResolutionOutcome};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Classic DNS UDP payload limit without EDNS.
const MAX_UDP_RESPONSE: usize = 512;
const RECV_BUFFER: usize = 4096;

/// Answers plain DNS queries on UDP by running them through the resolve use
/// case in a fixed mode.
pub struct LocalDnsServer {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsRequestHandler>,
}

pub struct DnsRequestHandler {
    use_case: Arc<ResolveDomainUseCase>,
    mode: ResolutionMode,
}

impl LocalDnsServer {
    pub async fn bind(
        addr: SocketAddr,
        use_case: Arc<ResolveDomainUseCase>,
        mode: ResolutionMode,
    ) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| DomainError::network(addr, format!("bind failed: {}", e)))?;
        Ok(Self {
            socket: Arc::new(socket),
            handler: Arc::new(DnsRequestHandler { use_case, mode }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::network("listener", e))
    }

    /// Serves until `shutdown` is cancelled. Each datagram is handled on its
    /// own task.
    pub async fn run(self, shutdown: CancellationToken) {
        let addr = self
            .socket
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_default();
        info!(addr = %addr, mode = %self.handler.mode, "DNS listener started");

        let mut buf = vec![0u8; RECV_BUFFER];
        loop {
            let (len, client) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(addr = %addr, "DNS listener stopped");
                    return;
                }
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(error = %e, "DNS listener receive failed");
                        continue;
                    }
                },
            };

            let request = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                if let Some(reply) = handler.handle(&request).await {
                    if let Err(e) = socket.send_to(&reply, client).await {
                        error!(client = %client, error = %e, "Failed to send DNS reply");
                    }
                }
            });
        }
    }
}

impl DnsRequestHandler {
    pub fn new(use_case: Arc<ResolveDomainUseCase>, mode: ResolutionMode) -> Self {
        Self { use_case, mode }
    }

    /// Builds the reply for one datagram. `None` means the datagram is
    /// dropped without an answer.
    pub async fn handle(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let request = match decode_message(bytes) {
            Ok(request) => request,
            Err(e) => {
                let id = Header::peek_id(bytes)?;
                debug!(id = id, error = %e, "Malformed query");
                let header = Header::response_to(&Header::query(id, false), RCODE_FORMERR);
                return encode_message(&DnsMessage {
                    header,
                    ..DnsMessage::default()
                })
                .ok();
            }
        };

        if request.header.qr {
            debug!(id = request.header.id, "Ignoring response packet");
            return None;
        }
        if request.questions.len() != 1 {
            return reply(DnsMessage::response_to(&request, RCODE_FORMERR));
        }

        let question = &request.questions[0];
        let Some(record_type) = RecordType::from_u16(question.qtype) else {
            debug!(qtype = question.qtype, "Unsupported query type");
            return reply(DnsMessage::response_to(&request, RCODE_NOTIMP));
        };

        debug!(domain = %question.name, record_type = %record_type, "DNS query received");
        let query = DnsQuery::new(question.name.clone(), record_type, self.mode);

        let mut response = match self.use_case.execute(&query).await {
            Ok(result) => match result.outcome {
                ResolutionOutcome::Answer { records } => {
                    let mut response = DnsMessage::response_to(&request, RCODE_NOERROR);
                    response.answers = records;
                    response
                }
                ResolutionOutcome::NameError => {
                    DnsMessage::response_to(&request, RCODE_NXDOMAIN)
                }
                ResolutionOutcome::ServerFailure { rcode } => {
                    DnsMessage::response_to(&request, rcode)
                }
                ResolutionOutcome::DelegationLoop { .. } => {
                    DnsMessage::response_to(&request, RCODE_SERVFAIL)
                }
            },
            Err(e) => {
                warn!(domain = %question.name, error = %e, "Listener query failed");
                DnsMessage::response_to(&request, RCODE_SERVFAIL)
            }
        };

        match encode_message(&response) {
            Ok(bytes) if bytes.len() <= MAX_UDP_RESPONSE => Some(bytes),
            Ok(_) => {
                response.answers.clear();
                response.header.tc = true;
                reply(response)
            }
            Err(e) => {
                warn!(error = %e, "Failed to encode reply");
                reply(DnsMessage::response_to(&request, RCODE_SERVFAIL))
            }
        }
    }
}

fn reply(message: DnsMessage) -> Option<Vec<u8>> {
    match encode_message(&message) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode error reply");
            None
        }
    }
}
