use crate::domain::{AccessTier, Principal};
use crate::error::{ModerationError, ModerationResult};
use crate::service::membership_directory::MembershipDirectory;
use crate::service::role_resolver::RoleResolver;

/// Outcome of an authorization check.
///
/// `Unauthenticated` asks the caller to start the login flow. `Denied`
/// asks for an access-denied response instead: redirecting a denied but
/// authenticated principal back to login would loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Unauthenticated,
    Denied,
}

/// Turns a resolved role set into pass/deny decisions for named tiers.
pub struct AccessGate<D: MembershipDirectory> {
    resolver: RoleResolver<D>,
}

impl<D: MembershipDirectory> AccessGate<D> {
    pub fn new(resolver: RoleResolver<D>) -> Self {
        AccessGate { resolver }
    }

    /// Authorize the current request against a tier.
    ///
    /// Directory uncertainty of any kind resolves to `Denied`, never
    /// `Allowed` and never a distinct user-visible error.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        tier: AccessTier,
    ) -> AccessDecision {
        let Some(principal) = principal else {
            return AccessDecision::Unauthenticated;
        };

        let verdict = self.resolver.resolve(principal.id.as_str()).await;
        if verdict.grants(tier) {
            AccessDecision::Allowed
        } else {
            tracing::debug!(principal_id = principal.id.as_str(), %tier, "access denied");
            AccessDecision::Denied
        }
    }

    /// `authorize` mapped onto the error taxonomy for callers composing
    /// with `?`.
    pub async fn require(
        &self,
        principal: Option<&Principal>,
        tier: AccessTier,
    ) -> ModerationResult<()> {
        match self.authorize(principal, tier).await {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Unauthenticated => Err(ModerationError::AuthenticationMissing),
            AccessDecision::Denied => Err(ModerationError::AuthorizationDenied(tier.to_string())),
        }
    }
}
