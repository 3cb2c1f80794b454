use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;

use moderation_core_db::models::moderation::{ActionKind, LogEntryModel};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::utils::{PgRowExt, TryFromRow};

/// PostgreSQL-backed moderation log store.
pub struct ModerationLogRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl ModerationLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for LogEntryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let action: String = row.try_get("action")?;
        Ok(LogEntryModel {
            id: row.try_get("id")?,
            author_id: row.bounded_text_opt("author_id")?,
            author_name: row.bounded_text_opt("author_name")?,
            target_id: row.bounded_text_opt("target_id")?,
            target_name: row.bounded_text("target_name")?,
            action: ActionKind::from_str(&action)
                .map_err(|_| "unreadable action kind")?,
            reason: row.bounded_text("reason")?,
            prior_offense_count: row.try_get("prior_offense_count")?,
            created_at: row.try_get("created_at")?,
            pinned: row.try_get("pinned")?,
            completed: row.try_get("completed")?,
            completed_by: row.bounded_text_opt("completed_by")?,
            completed_by_id: row.bounded_text_opt("completed_by_id")?,
            completed_at: row.try_get("completed_at")?,
        })
    }
}
