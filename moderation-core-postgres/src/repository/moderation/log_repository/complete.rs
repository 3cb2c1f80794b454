use std::error::Error;

use async_trait::async_trait;
use moderation_core_api::domain::Principal;
use moderation_core_db::models::moderation::{ActionKind, LogEntryModel};
use moderation_core_db::repository::complete_log::{CompleteLog, CompleteOutcome};

use crate::utils::TryFromRow;

use super::repo_impl::ModerationLogRepositoryImpl;

impl ModerationLogRepositoryImpl {
    pub(super) async fn complete_log_impl(
        repo: &ModerationLogRepositoryImpl,
        id: i64,
        completed_by: &Principal,
    ) -> Result<CompleteOutcome, Box<dyn Error + Send + Sync>> {
        // The action predicate makes the update conditional: of two
        // concurrent completions only one can match the BOLO state.
        let updated = sqlx::query(
            r#"
            UPDATE moderation_log
            SET action = $1,
                pinned = FALSE,
                completed = TRUE,
                completed_by = $2,
                completed_by_id = $3,
                completed_at = NOW()
            WHERE id = $4 AND action = $5
            RETURNING *
            "#,
        )
        .bind(ActionKind::Ban.to_string())
        .bind(completed_by.display_name.as_str())
        .bind(completed_by.id.as_str())
        .bind(id)
        .bind(ActionKind::ActiveBanBolo.to_string())
        .fetch_optional(repo.pool.as_ref())
        .await?;

        if let Some(row) = updated {
            return Ok(CompleteOutcome::Completed(LogEntryModel::try_from_row(&row)?));
        }

        let present = sqlx::query(r#"SELECT 1 AS present FROM moderation_log WHERE id = $1"#)
            .bind(id)
            .fetch_optional(repo.pool.as_ref())
            .await?;
        Ok(if present.is_some() {
            CompleteOutcome::InvalidTransition
        } else {
            CompleteOutcome::NotFound
        })
    }
}

#[async_trait]
impl CompleteLog for ModerationLogRepositoryImpl {
    async fn complete_log(
        &self,
        id: i64,
        completed_by: &Principal,
    ) -> Result<CompleteOutcome, Box<dyn Error + Send + Sync>> {
        Self::complete_log_impl(self, id, completed_by).await
    }
}
