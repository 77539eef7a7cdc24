mod cache_maintenance_port;
mod dns_cache_port;
mod dns_resolver;
mod packet_port;

pub use cache_maintenance_port::{CacheCompactionOutcome, CacheMaintenancePort};
pub use dns_cache_port::DnsCachePort;
pub use dns_resolver::DnsResolver;
pub use packet_port::{PacketPort, QueryPacket};

pub use dnscope_domain::DnsQuery;
