use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use moderation_core_api::domain::Principal;
use serde::{Deserialize, Serialize};

use crate::models::identifiable::Identifiable;
use crate::utils::bounded;

/// # Documentation
/// - One staff action recorded for oversight review.
/// - Append-only: the core never mutates or deletes activity entries.
/// - Separate stream from the moderation log with an independent
///   lifecycle; recording is best-effort and never blocks a log mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntryModel {
    pub id: i64,
    pub actor_id: HeaplessString<32>,
    pub actor_name: HeaplessString<100>,
    pub avatar_ref: Option<HeaplessString<200>>,

    /// Human-readable description of the action taken
    pub action: HeaplessString<250>,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for ActivityEntryModel {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Payload for appending an activity entry; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityEntry {
    pub actor_id: HeaplessString<32>,
    pub actor_name: HeaplessString<100>,
    pub avatar_ref: Option<HeaplessString<200>>,
    pub action: HeaplessString<250>,
}

impl NewActivityEntry {
    /// Build an activity note for the given actor, truncating the
    /// description to the bounded length.
    pub fn for_actor(actor: &Principal, action: &str) -> Self {
        NewActivityEntry {
            actor_id: actor.id.clone(),
            actor_name: actor.display_name.clone(),
            avatar_ref: actor.avatar_ref.clone(),
            action: bounded(action),
        }
    }
}
