pub mod identifiable;
pub mod moderation;

// Re-exports
pub use identifiable::*;
pub use moderation::*;
