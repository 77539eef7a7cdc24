#![allow(dead_code)]
use dnscope_infrastructure::dns::wire::{decode_message, encode_message, DnsMessage};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubProtocol {
    Udp,
    Tcp,
}

pub type RawHandler = Arc<dyn Fn(&[u8], StubProtocol) -> Option<Vec<u8>> + Send + Sync>;

/// In-process DNS server answering on UDP and TCP at the same address.
/// Returning `None` from the handler leaves the query unanswered.
pub struct StubDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubDnsServer {
    pub async fn start<F>(ip: Ipv4Addr, port: u16, handler: F) -> io::Result<Self>
    where
        F: Fn(&DnsMessage, StubProtocol) -> Option<DnsMessage> + Send + Sync + 'static,
    {
        Self::start_raw(ip, port, move |bytes, protocol| {
            let request = decode_message(bytes).ok()?;
            let response = handler(&request, protocol)?;
            encode_message(&response).ok()
        })
        .await
    }

    pub async fn start_raw<F>(ip: Ipv4Addr, port: u16, handler: F) -> io::Result<Self>
    where
        F: Fn(&[u8], StubProtocol) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let handler: RawHandler = Arc::new(handler);
        let udp = UdpSocket::bind(SocketAddr::new(IpAddr::V4(ip), port)).await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    received = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = received {
                            if let Some(reply) = handler(&buf[..len], StubProtocol::Udp) {
                                let _ = udp.send_to(&reply, peer).await;
                            }
                        }
                    }
                    accepted = tcp.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            let handler = Arc::clone(&handler);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut body).await.is_err() {
                                    return;
                                }
                                if let Some(reply) = handler(&body, StubProtocol::Tcp) {
                                    let mut framed = (reply.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&reply);
                                    let _ = stream.write_all(&framed).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Drop for StubDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
