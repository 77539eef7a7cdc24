use dnscope_application::use_cases::ResolveDomainUseCase;
use dnscope_domain::ResolutionMode;
use dnscope_infrastructure::dns::LocalDnsServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_listener(
    addr: SocketAddr,
    use_case: Arc<ResolveDomainUseCase>,
    mode: ResolutionMode,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let server = LocalDnsServer::bind(addr, use_case, mode).await?;
    info!(addr = %server.local_addr()?, "Local DNS listener bound");
    server.run(shutdown).await;
    Ok(())
}
