use async_trait::async_trait;
use thiserror::Error;

/// Lifecycle state of the membership directory client.
///
/// The resolver checks this before every resolution instead of reading a
/// shared "client ready" flag; an `Initializing` directory is never
/// called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Initializing,
    Ready,
}

/// Failure of a membership lookup.
///
/// Internal to the authorization layer: the resolver absorbs these and
/// fails closed, they are never surfaced to end users.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("membership directory is not ready")]
    NotReady,

    #[error("membership lookup timed out")]
    TimedOut,

    #[error("membership lookup failed: {0}")]
    Lookup(String),
}

/// External membership directory queried for role membership.
///
/// Implementations wrap the community platform's client (gateway bot,
/// HTTP API). `has_role` may suspend on network I/O and is treated as
/// slow and fallible by callers.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Current lifecycle state of the underlying client.
    fn state(&self) -> DirectoryState;

    /// Whether the principal holds the given role in the given community.
    async fn has_role(
        &self,
        guild_id: &str,
        principal_id: &str,
        role_id: &str,
    ) -> Result<bool, DirectoryError>;
}
