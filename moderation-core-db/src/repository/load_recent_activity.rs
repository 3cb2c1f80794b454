use async_trait::async_trait;

use crate::models::moderation::ActivityEntryModel;
use crate::repository::pagination::PageRequest;

/// Repository trait for reading the staff activity stream, newest first
#[async_trait]
pub trait LoadRecentActivity: Send + Sync {
    async fn load_recent_activity(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ActivityEntryModel>, Box<dyn std::error::Error + Send + Sync>>;
}
