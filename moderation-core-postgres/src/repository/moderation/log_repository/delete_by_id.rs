use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::repository::delete_log::{DeleteLog, DeleteOutcome};

use super::repo_impl::ModerationLogRepositoryImpl;

impl ModerationLogRepositoryImpl {
    pub(super) async fn delete_log_impl(
        repo: &ModerationLogRepositoryImpl,
        id: i64,
    ) -> Result<DeleteOutcome, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(r#"DELETE FROM moderation_log WHERE id = $1"#)
            .bind(id)
            .execute(repo.pool.as_ref())
            .await?;

        Ok(if result.rows_affected() > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

#[async_trait]
impl DeleteLog for ModerationLogRepositoryImpl {
    async fn delete_log(&self, id: i64) -> Result<DeleteOutcome, Box<dyn Error + Send + Sync>> {
        Self::delete_log_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::repository::create_log::CreateLog;
    use moderation_core_db::repository::delete_log::{DeleteLog, DeleteOutcome};
    use moderation_core_db::repository::load_recent_logs::LoadRecentLogs;
    use moderation_core_db::repository::pagination::PageRequest;

    use crate::repository::moderation::log_repository::test_utils::{
        random_target, test_entry, test_staff,
    };
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_delete_removes_exactly_one_entry(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let log_repo = &ctx.repos.log_repository;

        let author = test_staff(1);
        let first = log_repo
            .create_log(test_entry(&author, &random_target(), "r1"))
            .await?;
        let second = log_repo
            .create_log(test_entry(&author, &random_target(), "r2"))
            .await?;

        assert_eq!(
            log_repo.delete_log(first.id).await?,
            DeleteOutcome::Deleted
        );
        assert_eq!(
            log_repo.delete_log(first.id).await?,
            DeleteOutcome::NotFound
        );

        let listed = log_repo.load_recent_logs(PageRequest::default()).await?;
        assert!(listed.iter().any(|e| e.id == second.id));
        assert!(!listed.iter().any(|e| e.id == first.id));

        Ok(())
    }
}
