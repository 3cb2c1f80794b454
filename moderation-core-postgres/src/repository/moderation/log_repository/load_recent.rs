use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::models::moderation::LogEntryModel;
use moderation_core_db::repository::load_recent_logs::LoadRecentLogs;
use moderation_core_db::repository::pagination::PageRequest;

use crate::utils::TryFromRow;

use super::repo_impl::ModerationLogRepositoryImpl;

impl ModerationLogRepositoryImpl {
    pub(super) async fn load_recent_logs_impl(
        repo: &ModerationLogRepositoryImpl,
        page: PageRequest,
    ) -> Result<Vec<LogEntryModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM moderation_log
            ORDER BY pinned DESC, created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(repo.pool.as_ref())
        .await?;

        rows.iter().map(LogEntryModel::try_from_row).collect()
    }
}

#[async_trait]
impl LoadRecentLogs for ModerationLogRepositoryImpl {
    async fn load_recent_logs(
        &self,
        page: PageRequest,
    ) -> Result<Vec<LogEntryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_recent_logs_impl(self, page).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::repository::create_log::CreateLog;
    use moderation_core_db::repository::load_recent_logs::LoadRecentLogs;
    use moderation_core_db::repository::pagination::PageRequest;

    use crate::repository::moderation::log_repository::test_utils::{
        random_target, test_bolo, test_entry, test_staff,
    };
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_pinned_entries_lead_the_listing(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let log_repo = &ctx.repos.log_repository;

        let author = test_staff(1);
        let target = random_target();
        log_repo.create_log(test_entry(&author, &target, "r1")).await?;
        let pinned = log_repo.create_log(test_bolo(&target)).await?;
        log_repo.create_log(test_entry(&author, &target, "r2")).await?;

        let listed = log_repo.load_recent_logs(PageRequest::default()).await?;

        let pinned_pos = listed.iter().position(|e| e.id == pinned.id);
        assert_eq!(pinned_pos, Some(0));

        Ok(())
    }
}
