mod build_packet;
mod resolve_domain;

pub use build_packet::{BuildPacketUseCase, PacketInspection};
pub use resolve_domain::{ResolveDomainUseCase, ResolveResult};
