use async_trait::async_trait;

use crate::models::moderation::LogEntryModel;
use crate::repository::pagination::PageRequest;

/// Repository trait for reading the moderation log in display order
#[async_trait]
pub trait LoadRecentLogs: Send + Sync {
    /// Load a page of entries ordered pinned-first, then newest-first
    ///
    /// The ordering invariant holds regardless of insertion order or
    /// inserts that happened since the last read; ties within a group
    /// break on descending id, so the latest insert wins.
    async fn load_recent_logs(
        &self,
        page: PageRequest,
    ) -> Result<Vec<LogEntryModel>, Box<dyn std::error::Error + Send + Sync>>;
}
