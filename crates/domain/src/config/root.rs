use serde::{Deserialize, Serialize};

use super::benchmark::BenchmarkConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::parse_socket_addr;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use crate::dns_name::DomainName;
use crate::dns_query::ResolutionMode;

const LOCAL_CONFIG_PATH: &str = "dnscope.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnscope/config.toml";

/// Main configuration structure for dnscope
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Web API and local listener addresses
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstreams, root hints and round-trip tuning
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnscope.toml in current directory
    /// 3. /etc/dnscope/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(listen) = overrides.dns_listen {
            self.server.dns_listen = Some(listen);
        }
        if let Some(mode) = overrides.default_mode {
            self.resolver.default_mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }
        if let Some(listen) = &self.server.dns_listen {
            let addr = parse_socket_addr(listen, 0)?;
            if addr.port() == 0 {
                return Err(ConfigError::Validation(
                    "DNS listener port cannot be 0".to_string(),
                ));
            }
        }

        let resolver = &self.resolver;
        resolver.system_upstream_addr()?;
        resolver.recursive_upstream_addr()?;
        if resolver.root_hints.is_empty() {
            return Err(ConfigError::Validation(
                "No root hints configured".to_string(),
            ));
        }
        if resolver.nameserver_port == 0 {
            return Err(ConfigError::Validation(
                "Name server port cannot be 0".to_string(),
            ));
        }
        if resolver.max_hops == 0 {
            return Err(ConfigError::Validation(
                "max_hops must be at least 1".to_string(),
            ));
        }
        if resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be positive".to_string(),
            ));
        }

        if self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "Cache capacity cannot be 0".to_string(),
            ));
        }

        let bench = &self.benchmark;
        bench.google_addr()?;
        bench.cloudflare_addr()?;
        if bench.workers == 0 {
            return Err(ConfigError::Validation(
                "Benchmark workers cannot be 0".to_string(),
            ));
        }
        if bench.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Benchmark timeout_ms must be positive".to_string(),
            ));
        }
        for domain in &bench.domains {
            DomainName::parse(domain).map_err(|e| {
                ConfigError::Validation(format!("benchmark domain '{}': {}", domain, e))
            })?;
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub dns_listen: Option<String>,
    pub default_mode: Option<ResolutionMode>,
    pub log_level: Option<String>,
}
