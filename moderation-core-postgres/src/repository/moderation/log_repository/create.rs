use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::models::moderation::{LogEntryModel, NewLogEntry};
use moderation_core_db::repository::create_log::CreateLog;

use crate::utils::TryFromRow;

use super::repo_impl::ModerationLogRepositoryImpl;

impl ModerationLogRepositoryImpl {
    pub(super) async fn create_log_impl(
        repo: &ModerationLogRepositoryImpl,
        entry: NewLogEntry,
    ) -> Result<LogEntryModel, Box<dyn Error + Send + Sync>> {
        // Single statement: an aborted caller either persisted the whole
        // row or nothing.
        let row = sqlx::query(
            r#"
            INSERT INTO moderation_log (
                author_id,
                author_name,
                target_id,
                target_name,
                action,
                reason,
                prior_offense_count,
                pinned
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(entry.author_id.as_deref())
        .bind(entry.author_name.as_deref())
        .bind(entry.target_id.as_deref())
        .bind(entry.target_name.as_str())
        .bind(entry.action.to_string())
        .bind(entry.reason.as_str())
        .bind(entry.prior_offense_count)
        .bind(entry.pinned)
        .fetch_one(repo.pool.as_ref())
        .await?;

        LogEntryModel::try_from_row(&row)
    }
}

#[async_trait]
impl CreateLog for ModerationLogRepositoryImpl {
    async fn create_log(
        &self,
        entry: NewLogEntry,
    ) -> Result<LogEntryModel, Box<dyn Error + Send + Sync>> {
        Self::create_log_impl(self, entry).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::models::moderation::ActionKind;
    use moderation_core_db::repository::create_log::CreateLog;

    use crate::repository::moderation::log_repository::test_utils::{
        random_target, test_entry, test_staff,
    };
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_create_round_trips_the_entry(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let log_repo = &ctx.repos.log_repository;

        let author = test_staff(1);
        let target = random_target();
        let saved = log_repo.create_log(test_entry(&author, &target, "r1")).await?;

        assert!(saved.id > 0);
        assert_eq!(saved.author_id.as_deref(), Some("staff-1"));
        assert_eq!(saved.target_name.as_str(), target.as_str());
        assert_eq!(saved.action, ActionKind::Warning);
        assert!(!saved.pinned);
        assert!(!saved.completed);

        Ok(())
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_ids_are_monotonic() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let log_repo = &ctx.repos.log_repository;

        let author = test_staff(1);
        let target = random_target();
        let first = log_repo.create_log(test_entry(&author, &target, "r1")).await?;
        let second = log_repo.create_log(test_entry(&author, &target, "r2")).await?;

        assert!(second.id > first.id);

        Ok(())
    }
}
