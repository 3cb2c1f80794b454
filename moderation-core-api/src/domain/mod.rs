pub mod access_tier;
pub mod principal;
pub mod role_verdict;

// Re-exports
pub use access_tier::*;
pub use principal::*;
pub use role_verdict::*;
