use serde::{Deserialize, Serialize};

use crate::domain::access_tier::AccessTier;

/// # Documentation
/// - Capability set resolved for one principal from the membership
///   directory.
/// - Each flag is derived independently and stays false until proven true.
/// - Recomputed per access check; only the resolver's own TTL cache may
///   reuse a verdict, and never one produced by a failed resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleVerdict {
    pub is_staff: bool,
    pub has_dispatch_access: bool,
    pub is_human_resources: bool,
}

impl RoleVerdict {
    /// The all-false verdict every uncertain resolution collapses to.
    pub const fn fail_closed() -> Self {
        RoleVerdict {
            is_staff: false,
            has_dispatch_access: false,
            is_human_resources: false,
        }
    }

    /// Whether this verdict grants the given tier.
    pub fn grants(&self, tier: AccessTier) -> bool {
        match tier {
            AccessTier::Staff => self.is_staff,
            AccessTier::Dispatch => self.has_dispatch_access,
            AccessTier::HumanResources => self.is_human_resources,
        }
    }
}
