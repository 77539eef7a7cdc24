pub mod benchmark;
pub mod cache;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use benchmark::BenchmarkConfig;
pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;

use std::net::SocketAddr;

/// Parses `ip` or `ip:port`, filling in `default_port` when the port is
/// omitted. Bracketed IPv6 (`[::1]:53`) is accepted.
pub fn parse_socket_addr(raw: &str, default_port: u16) -> Result<SocketAddr, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .parse::<std::net::IpAddr>()
        .map(|ip| SocketAddr::new(ip, default_port))
        .map_err(|_| ConfigError::Validation(format!("invalid server address '{}'", raw)))
}
