use async_trait::async_trait;

/// Repository trait for the escalation engine's qualifying-entry count
///
/// Matches `target_name` exactly but case-insensitively, excluding
/// system-authored entries and entries authored by `exclude_author`.
/// Bounded to one target, so escalation never rescans unrelated entries.
#[async_trait]
pub trait CountOffenses: Send + Sync {
    /// Count qualifying entries for one target
    ///
    /// # Arguments
    /// * `target_name` - The target to match, case-insensitively
    /// * `exclude_author` - Author name whose entries never qualify
    async fn count_offenses(
        &self,
        target_name: &str,
        exclude_author: &str,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}
