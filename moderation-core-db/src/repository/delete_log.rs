use async_trait::async_trait;
use moderation_core_api::error::{ModerationError, ModerationResult};

/// Result of a deletion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    /// Bridge to the error taxonomy for callers composing with `?`.
    pub fn into_result(self, id: i64) -> ModerationResult<()> {
        match self {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::NotFound => Err(ModerationError::EntryNotFound(id)),
        }
    }
}

/// Repository trait for removing one entry by id
///
/// Removes exactly the entry with the given id and nothing else; ids are
/// never reassigned afterwards, so a delete cannot renumber another
/// entry's identity. Deleting an absent id reports `NotFound` rather
/// than raising.
#[async_trait]
pub trait DeleteLog: Send + Sync {
    async fn delete_log(
        &self,
        id: i64,
    ) -> Result<DeleteOutcome, Box<dyn std::error::Error + Send + Sync>>;
}
