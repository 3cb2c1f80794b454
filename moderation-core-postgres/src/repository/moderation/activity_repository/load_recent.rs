use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::models::moderation::ActivityEntryModel;
use moderation_core_db::repository::load_recent_activity::LoadRecentActivity;
use moderation_core_db::repository::pagination::PageRequest;

use crate::utils::TryFromRow;

use super::repo_impl::StaffActivityRepositoryImpl;

impl StaffActivityRepositoryImpl {
    pub(super) async fn load_recent_activity_impl(
        repo: &StaffActivityRepositoryImpl,
        page: PageRequest,
    ) -> Result<Vec<ActivityEntryModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM staff_activity
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(repo.pool.as_ref())
        .await?;

        rows.iter().map(ActivityEntryModel::try_from_row).collect()
    }
}

#[async_trait]
impl LoadRecentActivity for StaffActivityRepositoryImpl {
    async fn load_recent_activity(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ActivityEntryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_recent_activity_impl(self, page).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::models::moderation::NewActivityEntry;
    use moderation_core_db::repository::load_recent_activity::LoadRecentActivity;
    use moderation_core_db::repository::pagination::PageRequest;
    use moderation_core_db::repository::record_activity::RecordActivity;

    use crate::repository::moderation::log_repository::test_utils::test_staff;
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_stream_is_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.repos.activity_repository;

        let actor = test_staff(1);
        let first = activity_repo
            .record_activity(NewActivityEntry::for_actor(&actor, "first"))
            .await?;
        let second = activity_repo
            .record_activity(NewActivityEntry::for_actor(&actor, "second"))
            .await?;

        let listed = activity_repo
            .load_recent_activity(PageRequest::default())
            .await?;

        let first_pos = listed.iter().position(|e| e.id == first.id);
        let second_pos = listed.iter().position(|e| e.id == second.id);
        assert!(second_pos < first_pos);

        Ok(())
    }
}
