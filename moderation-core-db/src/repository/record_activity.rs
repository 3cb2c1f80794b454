use async_trait::async_trait;

use crate::models::moderation::{ActivityEntryModel, NewActivityEntry};

/// Repository trait for appending to the staff activity stream
///
/// The stream is append-only and independent of the moderation log's
/// transactional boundaries: a recording failure must never roll back or
/// block the log mutation it accompanies.
#[async_trait]
pub trait RecordActivity: Send + Sync {
    /// Append one activity entry and return it with generated fields set
    async fn record_activity(
        &self,
        entry: NewActivityEntry,
    ) -> Result<ActivityEntryModel, Box<dyn std::error::Error + Send + Sync>>;
}
