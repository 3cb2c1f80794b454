use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Authentication required")]
    AuthenticationMissing,

    #[error("Access denied: {0} tier required")]
    AuthorizationDenied(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Log entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Invalid transition for log entry {0}")]
    InvalidTransition(i64),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type ModerationResult<T> = Result<T, ModerationError>;
