use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::errors::ConfigError;
use super::parse_socket_addr;
use super::resolver::DNS_PORT;
use crate::dns_record::RecordType;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,

    #[serde(default = "default_record_type")]
    pub record_type: RecordType,

    #[serde(default = "default_google")]
    pub google: String,

    #[serde(default = "default_cloudflare")]
    pub cloudflare: String,

    /// Deadline applied to each target independently.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            record_type: default_record_type(),
            google: default_google(),
            cloudflare: default_cloudflare(),
            timeout_ms: default_timeout_ms(),
            workers: default_workers(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl BenchmarkConfig {
    pub fn google_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_socket_addr(&self.google, DNS_PORT)
    }

    pub fn cloudflare_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_socket_addr(&self.cloudflare, DNS_PORT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

fn default_domains() -> Vec<String> {
    vec![
        "google.com".to_string(),
        "example.com".to_string(),
        "wikipedia.org".to_string(),
    ]
}

fn default_record_type() -> RecordType {
    RecordType::A
}

fn default_google() -> String {
    "8.8.8.8:53".to_string()
}

fn default_cloudflare() -> String {
    "1.1.1.1:53".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_workers() -> usize {
    8
}

fn default_cooldown_secs() -> u64 {
    5
}
