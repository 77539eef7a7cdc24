pub mod builders;
pub mod stub_server;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use stub_server::*;
