use std::error::Error;
use std::sync::Arc;

use moderation_core_db::models::moderation::ActivityEntryModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::utils::{PgRowExt, TryFromRow};

/// PostgreSQL-backed staff activity stream.
pub struct StaffActivityRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl StaffActivityRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ActivityEntryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ActivityEntryModel {
            id: row.try_get("id")?,
            actor_id: row.bounded_text("actor_id")?,
            actor_name: row.bounded_text("actor_name")?,
            avatar_ref: row.bounded_text_opt("avatar_ref")?,
            action: row.bounded_text("action")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
