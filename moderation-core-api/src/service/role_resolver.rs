use std::env;
use std::sync::Arc;
use std::time::Duration;

use heapless::String as HeaplessString;
use moka::future::Cache;

use crate::domain::{AccessTier, RoleVerdict};
use crate::error::{ModerationError, ModerationResult};
use crate::service::membership_directory::{DirectoryError, DirectoryState, MembershipDirectory};

/// Default bound on a single membership lookup.
pub const DEFAULT_DIRECTORY_TIMEOUT: Duration = Duration::from_secs(3);

/// Community and role identifiers each tier is checked against.
#[derive(Debug, Clone)]
pub struct RoleMapping {
    pub guild_id: HeaplessString<32>,
    pub staff_role_id: HeaplessString<32>,
    pub dispatch_role_id: HeaplessString<32>,
    pub hr_role_id: HeaplessString<32>,
}

impl RoleMapping {
    pub fn new(
        guild_id: &str,
        staff_role_id: &str,
        dispatch_role_id: &str,
        hr_role_id: &str,
    ) -> ModerationResult<Self> {
        Ok(RoleMapping {
            guild_id: bounded_id(guild_id, "guild id")?,
            staff_role_id: bounded_id(staff_role_id, "staff role id")?,
            dispatch_role_id: bounded_id(dispatch_role_id, "dispatch role id")?,
            hr_role_id: bounded_id(hr_role_id, "hr role id")?,
        })
    }

    /// Read the mapping from the environment: `GUILD_ID`, `STAFF_ROLE_ID`,
    /// `CAD_ROLE_ID`, `HR_ROLE_ID`.
    pub fn from_env() -> ModerationResult<Self> {
        RoleMapping::new(
            &require_env("GUILD_ID")?,
            &require_env("STAFF_ROLE_ID")?,
            &require_env("CAD_ROLE_ID")?,
            &require_env("HR_ROLE_ID")?,
        )
    }

    /// Role identifier the given tier is resolved against.
    pub fn role_id_for(&self, tier: AccessTier) -> &str {
        match tier {
            AccessTier::Staff => self.staff_role_id.as_str(),
            AccessTier::Dispatch => self.dispatch_role_id.as_str(),
            AccessTier::HumanResources => self.hr_role_id.as_str(),
        }
    }
}

fn bounded_id(value: &str, what: &str) -> ModerationResult<HeaplessString<32>> {
    HeaplessString::try_from(value)
        .map_err(|_| ModerationError::ValidationError(format!("{what} too long (max 32 chars)")))
}

fn require_env(key: &str) -> ModerationResult<String> {
    env::var(key).map_err(|_| ModerationError::ValidationError(format!("{key} is not set")))
}

/// Resolves a principal's capability set from the membership directory.
///
/// Fail-closed: a directory that is still initializing, errors out, or
/// exceeds the lookup timeout yields the all-false verdict. The caller
/// never sees an error. All three tier flags go through one parameterized
/// membership check differing only in the role identifier compared
/// against.
pub struct RoleResolver<D: MembershipDirectory> {
    directory: Arc<D>,
    mapping: RoleMapping,
    timeout: Duration,
    verdict_cache: Option<Cache<String, RoleVerdict>>,
}

impl<D: MembershipDirectory> RoleResolver<D> {
    pub fn new(directory: Arc<D>, mapping: RoleMapping) -> Self {
        RoleResolver {
            directory,
            mapping,
            timeout: DEFAULT_DIRECTORY_TIMEOUT,
            verdict_cache: None,
        }
    }

    /// Override the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache successfully resolved verdicts for `ttl`.
    ///
    /// Failed resolutions are never cached, so after an outage the next
    /// check goes back to the directory instead of reusing a stale
    /// verdict.
    pub fn with_verdict_cache(mut self, ttl: Duration, capacity: u64) -> Self {
        self.verdict_cache = Some(
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        );
        self
    }

    /// Resolve the verdict for one principal.
    pub async fn resolve(&self, principal_id: &str) -> RoleVerdict {
        if self.directory.state() != DirectoryState::Ready {
            tracing::debug!(principal_id, "membership directory not ready, failing closed");
            return RoleVerdict::fail_closed();
        }

        if let Some(cache) = &self.verdict_cache {
            if let Some(verdict) = cache.get(principal_id).await {
                return verdict;
            }
        }

        match self.resolve_fresh(principal_id).await {
            Ok(verdict) => {
                if let Some(cache) = &self.verdict_cache {
                    cache.insert(principal_id.to_string(), verdict).await;
                }
                verdict
            }
            Err(err) => {
                tracing::warn!(principal_id, error = %err, "role resolution failed, failing closed");
                RoleVerdict::fail_closed()
            }
        }
    }

    async fn resolve_fresh(&self, principal_id: &str) -> Result<RoleVerdict, DirectoryError> {
        Ok(RoleVerdict {
            is_staff: self.check(principal_id, AccessTier::Staff).await?,
            has_dispatch_access: self.check(principal_id, AccessTier::Dispatch).await?,
            is_human_resources: self.check(principal_id, AccessTier::HumanResources).await?,
        })
    }

    /// The single membership check all three flags are derived through.
    async fn check(&self, principal_id: &str, tier: AccessTier) -> Result<bool, DirectoryError> {
        let role_id = self.mapping.role_id_for(tier);
        match tokio::time::timeout(
            self.timeout,
            self.directory
                .has_role(self.mapping.guild_id.as_str(), principal_id, role_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(DirectoryError::TimedOut),
        }
    }
}
