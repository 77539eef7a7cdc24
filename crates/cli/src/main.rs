use clap::{Parser, Subcommand};
use dnscope_domain::config::{parse_socket_addr, resolver::DNS_PORT};
use dnscope_domain::{CliOverrides, Config, RecordType, ResolutionMode};
use dnscope_jobs::{CacheCompactionJob, JobRunner};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod commands;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnscope")]
#[command(version)]
#[command(about = "dnscope - DNS resolver, cache inspector and latency benchmark")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long, global = true)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Default resolution mode (system, iterative, recursive, doh, auto)
    #[arg(short = 'm', long, global = true)]
    mode: Option<ResolutionMode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API, the optional DNS listener and the compaction job
    Serve {
        /// Also answer DNS queries on this UDP address
        #[arg(long, value_name = "ADDR")]
        dns_listen: Option<String>,
    },
    /// Resolve a name and print the answer
    Resolve {
        domain: String,
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,
        /// Upstream server for recursive mode
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Build a query packet and print its hex dump
    Packet {
        domain: String,
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,
        /// Send it to the system upstream and dump the reply too
        #[arg(long)]
        send: bool,
    },
    /// Benchmark the configured domains against local and public resolvers
    Bench {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve { dns_listen: None });

    let dns_listen = match &command {
        Command::Serve { dns_listen } => dns_listen.clone(),
        _ => None,
    };
    let overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind,
        dns_listen,
        default_mode: cli.mode,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(&config);

    let dns_services = di::DnsServices::new(&config)?;
    let use_cases = di::UseCases::new(&config, &dns_services)?;

    match command {
        Command::Serve { .. } => serve(config, dns_services, use_cases).await,
        Command::Resolve {
            domain,
            record_type,
            upstream,
        } => {
            // An upstream without --mode means the caller wants that server.
            let mode = match (cli.mode, &upstream) {
                (Some(mode), _) => mode,
                (None, Some(_)) => ResolutionMode::Recursive,
                (None, None) => config.resolver.default_mode,
            };
            let args = commands::ResolveArgs {
                domain,
                record_type,
                mode,
                upstream,
            };
            commands::run_resolve(&use_cases, args).await
        }
        Command::Packet {
            domain,
            record_type,
            send,
        } => commands::run_packet(&use_cases, &domain, record_type, send).await,
        Command::Bench { json } => commands::run_bench(&use_cases, json).await,
    }
}

async fn serve(
    config: Config,
    dns_services: di::DnsServices,
    use_cases: di::UseCases,
) -> anyhow::Result<()> {
    info!("Starting dnscope v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let job_handles = JobRunner::new()
        .with_cache_compaction(
            CacheCompactionJob::new(dns_services.cache.clone())
                .with_interval(config.cache.compaction_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start();

    let mut listener = None;
    if let Some(raw) = config.server.dns_listen.as_deref() {
        let addr = parse_socket_addr(raw, DNS_PORT)?;
        let use_case = use_cases.resolve.clone();
        let mode = config.resolver.default_mode;
        let token = shutdown.clone();
        listener = Some(tokio::spawn(async move {
            if let Err(e) = server::start_dns_listener(addr, use_case, mode, token).await {
                error!(error = %e, "DNS listener error");
            }
        }));
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;
    let result =
        server::start_web_server(web_addr, use_cases.app_state(&config), shutdown.clone()).await;

    shutdown.cancel();
    for handle in job_handles.into_iter().chain(listener) {
        let _ = handle.await;
    }

    info!("Server shutdown complete");
    result
}
