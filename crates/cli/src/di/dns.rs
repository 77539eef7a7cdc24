use dnscope_application::services::QueryMetrics;
use dnscope_domain::Config;
use dnscope_infrastructure::dns::{CoreResolver, RecordCache, ResolverSettings, WirePacketAdapter};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<CoreResolver>,
    pub cache: Arc<RecordCache>,
    pub packets: Arc<WirePacketAdapter>,
    pub metrics: Arc<QueryMetrics>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let settings = ResolverSettings::from_config(&config.resolver)?;
        let system_upstream = settings.system_upstream;
        let resolver = Arc::new(CoreResolver::new(settings));
        let packets = Arc::new(WirePacketAdapter::new(
            resolver.exchanger(),
            system_upstream,
        ));

        Ok(Self {
            resolver,
            cache: Arc::new(RecordCache::new(config.cache.capacity)),
            packets,
            metrics: Arc::new(QueryMetrics::new()),
        })
    }
}
