//! In-memory implementation of the repository traits.
//!
//! Reference store for unit tests and small single-process deployments.
//! Every mutation runs inside one write-guard section with no await
//! points, so a caller aborted mid-operation never leaves a partial
//! entry observable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use moderation_core_api::domain::Principal;
use tokio::sync::RwLock;

use crate::models::identifiable::Identifiable;
use crate::models::moderation::{
    ActionKind, ActivityEntryModel, LogEntryModel, NewActivityEntry, NewLogEntry,
};
use crate::repository::complete_log::{CompleteLog, CompleteOutcome};
use crate::repository::count_offenses::CountOffenses;
use crate::repository::create_log::CreateLog;
use crate::repository::delete_log::{DeleteLog, DeleteOutcome};
use crate::repository::load_recent_activity::LoadRecentActivity;
use crate::repository::load_recent_logs::LoadRecentLogs;
use crate::repository::pagination::PageRequest;
use crate::repository::record_activity::RecordActivity;
use crate::utils::normalize_target_name;

/// Id-indexed table with a monotonic id counter.
///
/// Ids are never reused, so a delete can never renumber another entry's
/// effective identity.
struct Table<T: Identifiable + Clone> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Identifiable + Clone> Table<T> {
    fn new() -> Self {
        Table {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let row = build(self.next_id);
        self.next_id += 1;
        self.rows.insert(row.id(), row.clone());
        row
    }
}

/// In-memory moderation log store.
pub struct InMemoryLogStore {
    entries: RwLock<Table<LogEntryModel>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        InMemoryLogStore {
            entries: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CreateLog for InMemoryLogStore {
    async fn create_log(
        &self,
        entry: NewLogEntry,
    ) -> Result<LogEntryModel, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.write().await;
        Ok(entries.insert_with(|id| LogEntryModel {
            id,
            author_id: entry.author_id,
            author_name: entry.author_name,
            target_id: entry.target_id,
            target_name: entry.target_name,
            action: entry.action,
            reason: entry.reason,
            prior_offense_count: entry.prior_offense_count,
            created_at: Utc::now(),
            pinned: entry.pinned,
            completed: false,
            completed_by: None,
            completed_by_id: None,
            completed_at: None,
        }))
    }
}

#[async_trait]
impl LoadRecentLogs for InMemoryLogStore {
    async fn load_recent_logs(
        &self,
        page: PageRequest,
    ) -> Result<Vec<LogEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = self.entries.read().await;
        let mut rows: Vec<LogEntryModel> = entries.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows.into_iter().skip(page.offset).take(page.limit).collect())
    }
}

#[async_trait]
impl CountOffenses for InMemoryLogStore {
    async fn count_offenses(
        &self,
        target_name: &str,
        exclude_author: &str,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        let wanted = normalize_target_name(target_name);
        let entries = self.entries.read().await;
        let count = entries
            .rows
            .values()
            .filter(|entry| !entry.is_automated())
            .filter(|entry| entry.author_name.as_deref() != Some(exclude_author))
            .filter(|entry| normalize_target_name(entry.target_name.as_str()) == wanted)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl CompleteLog for InMemoryLogStore {
    async fn complete_log(
        &self,
        id: i64,
        completed_by: &Principal,
    ) -> Result<CompleteOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.rows.get_mut(&id) else {
            return Ok(CompleteOutcome::NotFound);
        };
        if entry.action != ActionKind::ActiveBanBolo {
            return Ok(CompleteOutcome::InvalidTransition);
        }

        entry.action = ActionKind::Ban;
        entry.pinned = false;
        entry.completed = true;
        entry.completed_by = Some(completed_by.display_name.clone());
        entry.completed_by_id = Some(completed_by.id.clone());
        entry.completed_at = Some(Utc::now());
        Ok(CompleteOutcome::Completed(entry.clone()))
    }
}

#[async_trait]
impl DeleteLog for InMemoryLogStore {
    async fn delete_log(
        &self,
        id: i64,
    ) -> Result<DeleteOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.write().await;
        Ok(match entries.rows.remove(&id) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }
}

/// In-memory staff activity stream.
pub struct InMemoryActivityLog {
    entries: RwLock<Table<ActivityEntryModel>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        InMemoryActivityLog {
            entries: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordActivity for InMemoryActivityLog {
    async fn record_activity(
        &self,
        entry: NewActivityEntry,
    ) -> Result<ActivityEntryModel, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.write().await;
        Ok(entries.insert_with(|id| ActivityEntryModel {
            id,
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            avatar_ref: entry.avatar_ref,
            action: entry.action,
            created_at: Utc::now(),
        }))
    }
}

#[async_trait]
impl LoadRecentActivity for InMemoryActivityLog {
    async fn load_recent_activity(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ActivityEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = self.entries.read().await;
        let mut rows: Vec<ActivityEntryModel> = entries.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows.into_iter().skip(page.offset).take(page.limit).collect())
    }
}
