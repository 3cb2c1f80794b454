use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use crate::error::{ModerationError, ModerationResult};

/// # Documentation
/// - Identity attached to the current request by the authentication
///   collaborator.
/// - Ephemeral: supplied per request and never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// External identity id (directory snowflake)
    pub id: HeaplessString<32>,

    /// Display name shown in dashboards and activity notes
    pub display_name: HeaplessString<100>,

    /// Avatar reference, when the identity service supplies one
    pub avatar_ref: Option<HeaplessString<200>>,
}

impl Principal {
    pub fn new(id: &str, display_name: &str, avatar_ref: Option<&str>) -> ModerationResult<Self> {
        Ok(Principal {
            id: HeaplessString::try_from(id).map_err(|_| {
                ModerationError::ValidationError("principal id too long (max 32 chars)".to_string())
            })?,
            display_name: HeaplessString::try_from(display_name).map_err(|_| {
                ModerationError::ValidationError("display name too long (max 100 chars)".to_string())
            })?,
            avatar_ref: avatar_ref
                .map(HeaplessString::try_from)
                .transpose()
                .map_err(|_| {
                    ModerationError::ValidationError(
                        "avatar reference too long (max 200 chars)".to_string(),
                    )
                })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_snowflake_sized_ids() {
        let principal = Principal::new("123456789012345678", "Sgt. Mira", Some("avatars/abc"))
            .expect("principal should build");
        assert_eq!(principal.id.as_str(), "123456789012345678");
        assert_eq!(principal.display_name.as_str(), "Sgt. Mira");
    }

    #[test]
    fn test_new_rejects_oversized_id() {
        let oversized = "x".repeat(40);
        assert!(Principal::new(&oversized, "Name", None).is_err());
    }
}
