pub mod test_app;

#[allow(unused_imports)]
pub use test_app::*;
