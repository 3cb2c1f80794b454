use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Documentation
/// - Named access level gating one surface of the staff dashboard.
/// - Tiers are granted independently via external role membership, not as
///   a linear hierarchy: a principal can hold any subset of them.
/// - HumanResources is the only tier permitted to delete log entries;
///   Staff is sufficient to create and complete them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessTier {
    Staff,
    Dispatch,
    HumanResources,
}

impl std::fmt::Display for AccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessTier::Staff => write!(f, "Staff"),
            AccessTier::Dispatch => write!(f, "Dispatch"),
            AccessTier::HumanResources => write!(f, "HumanResources"),
        }
    }
}

impl FromStr for AccessTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Staff" => Ok(AccessTier::Staff),
            "Dispatch" => Ok(AccessTier::Dispatch),
            "HumanResources" => Ok(AccessTier::HumanResources),
            _ => Err(()),
        }
    }
}

/// All tiers, in order of the surface they expose (least to most privileged).
pub const ALL_TIERS: [AccessTier; 3] = [
    AccessTier::Staff,
    AccessTier::Dispatch,
    AccessTier::HumanResources,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for tier in ALL_TIERS {
            assert_eq!(tier.to_string().parse::<AccessTier>(), Ok(tier));
        }
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        assert!("Janitor".parse::<AccessTier>().is_err());
    }
}
