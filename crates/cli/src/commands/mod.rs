mod bench;
mod packet;
mod resolve;

pub use bench::run_bench;
pub use packet::run_packet;
pub use resolve::{run_resolve, ResolveArgs};
