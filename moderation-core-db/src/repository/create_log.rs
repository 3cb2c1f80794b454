use async_trait::async_trait;

use crate::models::moderation::{LogEntryModel, NewLogEntry};

/// Repository trait for inserting one moderation log entry
///
/// The store assigns the identifier and creation timestamp and returns
/// the persisted entry. Identifiers are assigned monotonically and never
/// reused after deletion, and concurrent inserts must neither lose
/// entries nor hand out duplicate ids. A caller aborted before the
/// insert finishes must not leave a partial entry observable.
///
/// # Example
/// ```ignore
/// impl CreateLog for ModerationLogRepositoryImpl {
///     async fn create_log(&self, entry: NewLogEntry) -> Result<LogEntryModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateLog: Send + Sync {
    /// Insert a new entry and return it with generated fields populated
    ///
    /// # Arguments
    /// * `entry` - The payload to persist
    ///
    /// # Returns
    /// * `Ok(LogEntryModel)` - The persisted entry with id and timestamp set
    /// * `Err` - An error if the insert could not be executed
    async fn create_log(
        &self,
        entry: NewLogEntry,
    ) -> Result<LogEntryModel, Box<dyn std::error::Error + Send + Sync>>;
}
