use async_trait::async_trait;
use moderation_core_api::domain::Principal;
use moderation_core_api::error::{ModerationError, ModerationResult};

use crate::models::moderation::LogEntryModel;

/// Result of a completion attempt.
///
/// `InvalidTransition` is a report, not a failure: completing an entry
/// that is not an active ban BOLO leaves it untouched and must not abort
/// the caller's surrounding work.
#[derive(Debug, Clone, PartialEq)]
pub enum CompleteOutcome {
    Completed(LogEntryModel),
    NotFound,
    InvalidTransition,
}

impl CompleteOutcome {
    /// Bridge to the error taxonomy for callers composing with `?`.
    pub fn into_result(self, id: i64) -> ModerationResult<LogEntryModel> {
        match self {
            CompleteOutcome::Completed(entry) => Ok(entry),
            CompleteOutcome::NotFound => Err(ModerationError::EntryNotFound(id)),
            CompleteOutcome::InvalidTransition => Err(ModerationError::InvalidTransition(id)),
        }
    }
}

/// Repository trait for completing an active ban BOLO
///
/// Valid only while the entry's action is `ActiveBanBolo`: completion
/// turns it into a `Ban`, fills the completion fields from the principal
/// and clears the pin. Any other current state yields
/// `InvalidTransition`, so a second completion of the same id is
/// rejected. No two concurrent completions of one id can both succeed.
#[async_trait]
pub trait CompleteLog: Send + Sync {
    async fn complete_log(
        &self,
        id: i64,
        completed_by: &Principal,
    ) -> Result<CompleteOutcome, Box<dyn std::error::Error + Send + Sync>>;
}
