use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::repository::count_offenses::CountOffenses;
use sqlx::Row;

use super::repo_impl::ModerationLogRepositoryImpl;

impl ModerationLogRepositoryImpl {
    pub(super) async fn count_offenses_impl(
        repo: &ModerationLogRepositoryImpl,
        target_name: &str,
        exclude_author: &str,
    ) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS offense_count
            FROM moderation_log
            WHERE LOWER(target_name) = LOWER($1)
              AND author_id IS NOT NULL
              AND author_name <> $2
            "#,
        )
        .bind(target_name)
        .bind(exclude_author)
        .fetch_one(repo.pool.as_ref())
        .await?;

        Ok(row.try_get("offense_count")?)
    }
}

#[async_trait]
impl CountOffenses for ModerationLogRepositoryImpl {
    async fn count_offenses(
        &self,
        target_name: &str,
        exclude_author: &str,
    ) -> Result<i64, Box<dyn Error + Send + Sync>> {
        Self::count_offenses_impl(self, target_name, exclude_author).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::models::moderation::AUTOMATION_AUTHOR_NAME;
    use moderation_core_db::repository::count_offenses::CountOffenses;
    use moderation_core_db::repository::create_log::CreateLog;

    use crate::repository::moderation::log_repository::test_utils::{
        random_target, test_bolo, test_entry, test_staff,
    };
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_count_ignores_case_and_automation_entries(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let log_repo = &ctx.repos.log_repository;

        let author = test_staff(1);
        let target = random_target();
        log_repo
            .create_log(test_entry(&author, &target.to_uppercase(), "r1"))
            .await?;
        log_repo.create_log(test_entry(&author, &target, "r2")).await?;
        log_repo.create_log(test_bolo(&target)).await?;

        let count = log_repo
            .count_offenses(&target, AUTOMATION_AUTHOR_NAME)
            .await?;
        assert_eq!(count, 2);

        Ok(())
    }
}
