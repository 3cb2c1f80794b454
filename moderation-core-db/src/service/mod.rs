pub mod moderation_service;

// Re-exports
pub use moderation_service::*;
