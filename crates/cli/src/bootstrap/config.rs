use dnscope_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up so the summary is not lost.
pub fn log_config_summary(config: &Config) {
    info!(
        web_port = config.server.web_port,
        dns_listen = config.server.dns_listen.as_deref().unwrap_or("disabled"),
        default_mode = %config.resolver.default_mode,
        cache_capacity = config.cache.capacity,
        benchmark_domains = config.benchmark.domains.len(),
        "Configuration loaded"
    );
}
