use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;
use super::parse_socket_addr;
use crate::dns_query::ResolutionMode;

pub const DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub default_mode: ResolutionMode,

    #[serde(default = "default_system_upstream")]
    pub system_upstream: String,

    #[serde(default = "default_recursive_upstream")]
    pub recursive_upstream: String,

    #[serde(default = "default_root_hints")]
    pub root_hints: Vec<IpAddr>,

    /// Port used when talking to root and delegated name servers.
    #[serde(default = "default_nameserver_port")]
    pub nameserver_port: u16,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Extra attempts after the first one for a single round trip.
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_max_hops")]
    pub max_hops: u32,

    #[serde(default = "default_doh_url")]
    pub doh_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_mode: ResolutionMode::default(),
            system_upstream: default_system_upstream(),
            recursive_upstream: default_recursive_upstream(),
            root_hints: default_root_hints(),
            nameserver_port: default_nameserver_port(),
            query_timeout_ms: default_query_timeout_ms(),
            retries: default_retries(),
            max_hops: default_max_hops(),
            doh_url: default_doh_url(),
        }
    }
}

impl ResolverConfig {
    pub fn system_upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_socket_addr(&self.system_upstream, DNS_PORT)
    }

    pub fn recursive_upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_socket_addr(&self.recursive_upstream, DNS_PORT)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

fn default_system_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_recursive_upstream() -> String {
    "1.1.1.1:53".to_string()
}

/// a.root-servers.net through m.root-servers.net.
fn default_root_hints() -> Vec<IpAddr> {
    [
        [198, 41, 0, 4],
        [199, 9, 14, 201],
        [192, 33, 4, 12],
        [199, 7, 91, 13],
        [192, 203, 230, 10],
        [192, 5, 5, 241],
        [192, 112, 36, 4],
        [198, 97, 190, 53],
        [192, 36, 148, 17],
        [192, 58, 128, 30],
        [193, 0, 14, 129],
        [199, 7, 83, 42],
        [202, 12, 27, 33],
    ]
    .into_iter()
    .map(|octets| IpAddr::V4(Ipv4Addr::from(octets)))
    .collect()
}

fn default_nameserver_port() -> u16 {
    DNS_PORT
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_retries() -> u32 {
    1
}

fn default_max_hops() -> u32 {
    20
}

fn default_doh_url() -> String {
    "https://dns.google/dns-query".to_string()
}
