pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::PostgresRepositories;
pub use repository::moderation::activity_repository::StaffActivityRepositoryImpl;
pub use repository::moderation::log_repository::ModerationLogRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
