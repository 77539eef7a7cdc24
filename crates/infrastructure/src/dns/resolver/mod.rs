pub mod core;
pub mod iterative;

pub use core::{CoreResolver, ResolverSettings};
pub use iterative::IterativeResolver;
