use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::moderation::activity_repository::StaffActivityRepositoryImpl;
use crate::repository::moderation::log_repository::ModerationLogRepositoryImpl;

/// Entry point wiring one connection pool to the repository
/// implementations. Intended to be created once at startup and shared.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Build the moderation repositories over the shared pool.
    pub fn moderation_repos(&self) -> ModerationRepositories {
        ModerationRepositories {
            log_repository: Arc::new(ModerationLogRepositoryImpl::new(self.pool.clone())),
            activity_repository: Arc::new(StaffActivityRepositoryImpl::new(self.pool.clone())),
        }
    }
}

/// Container for the moderation module repositories
pub struct ModerationRepositories {
    pub log_repository: Arc<ModerationLogRepositoryImpl>,
    pub activity_repository: Arc<StaffActivityRepositoryImpl>,
}
