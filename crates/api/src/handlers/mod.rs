pub mod benchmark;
pub mod cache;
pub mod health;
pub mod metrics;
pub mod packet;
pub mod resolve;

pub use benchmark::run_benchmark;
pub use cache::{clear_cache, get_cache};
pub use health::health_check;
pub use metrics::get_metrics;
pub use packet::build_packet;
pub use resolve::resolve;
