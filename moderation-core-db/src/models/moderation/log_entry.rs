use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use moderation_core_api::domain::Principal;
use moderation_core_api::error::{ModerationError, ModerationResult};
use serde::{Deserialize, Serialize};

use crate::models::identifiable::Identifiable;
use crate::models::moderation::action_kind::ActionKind;

/// Sentinel author name carried by system-generated entries. Counting for
/// escalation always excludes this author, so synthetic entries can never
/// feed back into their own trigger.
pub const AUTOMATION_AUTHOR_NAME: &str = "Automation";

/// # Documentation
/// - One moderation action against a target, owned exclusively by the
///   log store.
/// - `id` is assigned monotonically by the store and never reused after
///   deletion.
/// - `prior_offense_count` is a snapshot taken when the entry is created;
///   later mutations never recompute it.
/// - `target_name` is the escalation matching key, compared
///   case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryModel {
    pub id: i64,

    /// Author identity; `None` exactly for system-generated entries
    pub author_id: Option<HeaplessString<32>>,

    /// Author display name; the sentinel "Automation" for system entries
    pub author_name: Option<HeaplessString<100>>,

    /// External id of the target, when known
    pub target_id: Option<HeaplessString<32>>,

    pub target_name: HeaplessString<100>,

    pub action: ActionKind,

    pub reason: HeaplessString<400>,

    /// Qualifying entries counted when this entry was created
    pub prior_offense_count: i32,

    pub created_at: DateTime<Utc>,

    /// Pinned entries sort before unpinned ones in every listing
    pub pinned: bool,

    pub completed: bool,
    pub completed_by: Option<HeaplessString<100>>,
    pub completed_by_id: Option<HeaplessString<32>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl LogEntryModel {
    /// Whether this entry was synthesized by the escalation engine.
    pub fn is_automated(&self) -> bool {
        self.author_id.is_none()
    }
}

impl Identifiable for LogEntryModel {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Payload for creating a log entry; the store assigns `id` and
/// `created_at`, and completion state always starts empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub author_id: Option<HeaplessString<32>>,
    pub author_name: Option<HeaplessString<100>>,
    pub target_id: Option<HeaplessString<32>>,
    pub target_name: HeaplessString<100>,
    pub action: ActionKind,
    pub reason: HeaplessString<400>,
    pub prior_offense_count: i32,
    pub pinned: bool,
}

impl NewLogEntry {
    /// Staff-authored entry payload.
    pub fn authored(
        author: &Principal,
        target_id: Option<&str>,
        target_name: &str,
        action: ActionKind,
        reason: &str,
    ) -> ModerationResult<Self> {
        Ok(NewLogEntry {
            author_id: Some(author.id.clone()),
            author_name: Some(author.display_name.clone()),
            target_id: target_id
                .map(HeaplessString::try_from)
                .transpose()
                .map_err(|_| {
                    ModerationError::ValidationError("target id too long (max 32 chars)".to_string())
                })?,
            target_name: HeaplessString::try_from(target_name).map_err(|_| {
                ModerationError::ValidationError("target name too long (max 100 chars)".to_string())
            })?,
            action,
            reason: HeaplessString::try_from(reason).map_err(|_| {
                ModerationError::ValidationError("reason too long (max 400 chars)".to_string())
            })?,
            prior_offense_count: 0,
            pinned: false,
        })
    }

    /// Whether the payload describes a system-generated entry.
    pub fn is_automated(&self) -> bool {
        self.author_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authored_entries_carry_the_author_and_start_unpinned() {
        let author = Principal::new("staff-1", "Sgt. Mira", None).expect("principal");
        let entry = NewLogEntry::authored(&author, Some("target-9"), "alice", ActionKind::Warning, "spam")
            .expect("entry");

        assert_eq!(entry.author_id.as_deref(), Some("staff-1"));
        assert_eq!(entry.author_name.as_deref(), Some("Sgt. Mira"));
        assert!(!entry.pinned);
        assert!(!entry.is_automated());
        assert_eq!(entry.prior_offense_count, 0);
    }

    #[test]
    fn test_authored_rejects_oversized_target_name() {
        let author = Principal::new("staff-1", "Sgt. Mira", None).expect("principal");
        let oversized = "x".repeat(150);
        assert!(
            NewLogEntry::authored(&author, None, &oversized, ActionKind::Note, "r").is_err()
        );
    }
}
