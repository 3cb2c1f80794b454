pub mod complete_log;
pub mod count_offenses;
pub mod create_log;
pub mod delete_log;
pub mod load_recent_activity;
pub mod load_recent_logs;
pub mod memory;
pub mod pagination;
pub mod record_activity;

// Re-exports
pub use complete_log::*;
pub use count_offenses::*;
pub use create_log::*;
pub use delete_log::*;
pub use load_recent_activity::*;
pub use load_recent_logs::*;
pub use memory::{InMemoryActivityLog, InMemoryLogStore};
pub use pagination::*;
pub use record_activity::*;
