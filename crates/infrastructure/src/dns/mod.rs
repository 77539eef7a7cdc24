pub mod cache;
pub mod exchange;
pub mod packet;
pub mod resolver;
pub mod server;
pub mod transport;
pub mod wire;

pub use cache::{CacheMetrics, RecordCache};
pub use exchange::UpstreamExchanger;
pub use packet::WirePacketAdapter;
pub use resolver::{CoreResolver, IterativeResolver, ResolverSettings};
pub use server::{DnsRequestHandler, LocalDnsServer};
