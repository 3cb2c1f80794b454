use std::error::Error;

use async_trait::async_trait;
use moderation_core_db::models::moderation::{ActivityEntryModel, NewActivityEntry};
use moderation_core_db::repository::record_activity::RecordActivity;

use crate::utils::TryFromRow;

use super::repo_impl::StaffActivityRepositoryImpl;

impl StaffActivityRepositoryImpl {
    pub(super) async fn record_activity_impl(
        repo: &StaffActivityRepositoryImpl,
        entry: NewActivityEntry,
    ) -> Result<ActivityEntryModel, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            INSERT INTO staff_activity (actor_id, actor_name, avatar_ref, action)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.actor_id.as_str())
        .bind(entry.actor_name.as_str())
        .bind(entry.avatar_ref.as_deref())
        .bind(entry.action.as_str())
        .fetch_one(repo.pool.as_ref())
        .await?;

        ActivityEntryModel::try_from_row(&row)
    }
}

#[async_trait]
impl RecordActivity for StaffActivityRepositoryImpl {
    async fn record_activity(
        &self,
        entry: NewActivityEntry,
    ) -> Result<ActivityEntryModel, Box<dyn Error + Send + Sync>> {
        Self::record_activity_impl(self, entry).await
    }
}

#[cfg(test)]
mod tests {
    use moderation_core_db::models::moderation::NewActivityEntry;
    use moderation_core_db::repository::record_activity::RecordActivity;

    use crate::repository::moderation::log_repository::test_utils::test_staff;
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    #[serial_test::serial]
    #[ignore] // requires a live PostgreSQL at DATABASE_URL
    async fn test_record_round_trips_the_entry(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.repos.activity_repository;

        let actor = test_staff(1);
        let saved = activity_repo
            .record_activity(NewActivityEntry::for_actor(&actor, "Created log #1"))
            .await?;

        assert!(saved.id > 0);
        assert_eq!(saved.actor_id.as_str(), "staff-1");
        assert_eq!(saved.action.as_str(), "Created log #1");

        Ok(())
    }
}
