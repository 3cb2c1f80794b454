use crate::models::moderation::{
    ActionKind, LogEntryModel, NewLogEntry, AUTOMATION_AUTHOR_NAME,
};
use crate::repository::count_offenses::CountOffenses;
use crate::repository::create_log::CreateLog;
use crate::utils::bounded;

use super::target_locks::TargetLocks;

/// Repeat-offense count at which a target is flagged for a ban decision.
/// Fixed policy constant, not user-configurable.
pub const ESCALATION_THRESHOLD: i64 = 3;

/// Outcome of recording one entry through the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationOutcome {
    /// The entry that was inserted for the caller
    pub entry: LogEntryModel,
    /// The synthetic BOLO entry, when this insert crossed the threshold
    pub escalation: Option<LogEntryModel>,
}

/// Audit-log escalation engine.
///
/// Consumes each newly created log entry and flags its target with a
/// pinned `ActiveBanBolo` entry whenever the count of qualifying entries
/// reaches a multiple of [`ESCALATION_THRESHOLD`] (3, 6, 9, ...). The
/// count includes the entry just inserted, so the third qualifying entry
/// is the trigger. Counting excludes system-authored entries, so a
/// synthetic entry never feeds back into its own trigger.
pub struct EscalationEngine {
    target_locks: TargetLocks,
}

impl EscalationEngine {
    pub fn new() -> Self {
        EscalationEngine {
            target_locks: TargetLocks::new(),
        }
    }

    /// Insert `entry` and evaluate the escalation policy for its target.
    ///
    /// The stripe lock held across count and insert makes the sequence
    /// atomic with respect to other inserts for the same target: two
    /// staff members logging one target concurrently produce exactly one
    /// synthetic entry per threshold crossing. The lock is never held
    /// across a directory call or any other network wait.
    pub async fn record<S>(
        &self,
        store: &S,
        entry: NewLogEntry,
    ) -> Result<EscalationOutcome, Box<dyn std::error::Error + Send + Sync>>
    where
        S: CreateLog + CountOffenses,
    {
        let _target_guard = self.target_locks.lock(entry.target_name.as_str()).await;

        let created = store.create_log(entry).await?;
        if created.is_automated() {
            return Ok(EscalationOutcome {
                entry: created,
                escalation: None,
            });
        }

        let count = store
            .count_offenses(created.target_name.as_str(), AUTOMATION_AUTHOR_NAME)
            .await?;
        if count == 0 || count % ESCALATION_THRESHOLD != 0 {
            return Ok(EscalationOutcome {
                entry: created,
                escalation: None,
            });
        }

        let flagged = store
            .create_log(Self::synthesize_bolo(&created, count))
            .await?;
        tracing::info!(
            target_name = created.target_name.as_str(),
            count,
            bolo_id = flagged.id,
            "repeat-offense threshold crossed, ban BOLO created"
        );
        Ok(EscalationOutcome {
            entry: created,
            escalation: Some(flagged),
        })
    }

    /// The system-authored flag entry for a target that crossed the
    /// threshold.
    fn synthesize_bolo(trigger: &LogEntryModel, count: i64) -> NewLogEntry {
        NewLogEntry {
            author_id: None,
            author_name: Some(bounded(AUTOMATION_AUTHOR_NAME)),
            target_id: trigger.target_id.clone(),
            target_name: trigger.target_name.clone(),
            action: ActionKind::ActiveBanBolo,
            reason: bounded(&format!(
                "Reached {ESCALATION_THRESHOLD} previous punishments"
            )),
            prior_offense_count: count as i32,
            pinned: true,
        }
    }
}

impl Default for EscalationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use moderation_core_api::domain::Principal;

    use super::*;
    use crate::repository::load_recent_logs::LoadRecentLogs;
    use crate::repository::memory::InMemoryLogStore;
    use crate::repository::pagination::PageRequest;

    fn staff(n: u32) -> Principal {
        Principal::new(&format!("staff-{n}"), &format!("Staff Member {n}"), None)
            .expect("principal")
    }

    fn warning(author: &Principal, target: &str, reason: &str) -> NewLogEntry {
        NewLogEntry::authored(author, None, target, ActionKind::Warning, reason).expect("entry")
    }

    async fn bolos(store: &InMemoryLogStore) -> Vec<LogEntryModel> {
        store
            .load_recent_logs(PageRequest::default())
            .await
            .expect("list")
            .into_iter()
            .filter(|entry| entry.action == ActionKind::ActiveBanBolo)
            .collect()
    }

    #[tokio::test]
    async fn test_third_entry_triggers_exactly_one_pinned_bolo() {
        let engine = EscalationEngine::new();
        let store = InMemoryLogStore::new();

        let first = engine
            .record(&store, warning(&staff(1), "alice", "r1"))
            .await
            .expect("record");
        assert!(first.escalation.is_none());

        let second = engine
            .record(&store, warning(&staff(2), "alice", "r2"))
            .await
            .expect("record");
        assert!(second.escalation.is_none());

        let third = engine
            .record(&store, warning(&staff(3), "alice", "r3"))
            .await
            .expect("record");
        let flagged = third.escalation.expect("third entry must escalate");

        assert!(flagged.is_automated());
        assert_eq!(flagged.author_name.as_deref(), Some(AUTOMATION_AUTHOR_NAME));
        assert_eq!(flagged.action, ActionKind::ActiveBanBolo);
        assert!(flagged.pinned);
        assert_eq!(flagged.prior_offense_count, 3);
        assert_eq!(flagged.target_name.as_str(), "alice");
        assert_eq!(bolos(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        let engine = EscalationEngine::new();
        let store = InMemoryLogStore::new();

        engine.record(&store, warning(&staff(1), "Alice", "r1")).await.expect("record");
        engine.record(&store, warning(&staff(2), "ALICE", "r2")).await.expect("record");
        let third = engine
            .record(&store, warning(&staff(3), "alice", "r3"))
            .await
            .expect("record");

        assert!(third.escalation.is_some());
    }

    #[tokio::test]
    async fn test_retrigger_policy_fires_at_multiples_of_the_threshold() {
        let engine = EscalationEngine::new();
        let store = InMemoryLogStore::new();
        let author = staff(1);

        let mut escalations = Vec::new();
        for i in 1..=7 {
            let outcome = engine
                .record(&store, warning(&author, "alice", &format!("r{i}")))
                .await
                .expect("record");
            escalations.push(outcome.escalation.is_some());
        }

        // Fires on the 3rd and 6th qualifying entry, nowhere else.
        assert_eq!(
            escalations,
            vec![false, false, true, false, false, true, false]
        );
        assert_eq!(bolos(&store).await.len(), 2);

        let second_bolo = &bolos(&store).await[0];
        assert_eq!(second_bolo.prior_offense_count, 6);
    }

    #[tokio::test]
    async fn test_system_authored_entries_neither_count_nor_trigger() {
        let engine = EscalationEngine::new();
        let store = InMemoryLogStore::new();

        for _ in 0..4 {
            let synthetic = NewLogEntry {
                author_id: None,
                author_name: Some(bounded(AUTOMATION_AUTHOR_NAME)),
                target_id: None,
                target_name: bounded("alice"),
                action: ActionKind::Note,
                reason: bounded("system note"),
                prior_offense_count: 0,
                pinned: false,
            };
            let outcome = engine.record(&store, synthetic).await.expect("record");
            assert!(outcome.escalation.is_none());
        }

        // Two staff entries later the count is still only 2.
        engine.record(&store, warning(&staff(1), "alice", "r1")).await.expect("record");
        let outcome = engine
            .record(&store, warning(&staff(2), "alice", "r2"))
            .await
            .expect("record");
        assert!(outcome.escalation.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates_produce_one_bolo_per_crossing() {
        let engine = Arc::new(EscalationEngine::new());
        let store = Arc::new(InMemoryLogStore::new());

        let mut handles = Vec::new();
        for i in 0..3 {
            let engine = engine.clone();
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .record(store.as_ref(), warning(&staff(i), "alice", "concurrent"))
                    .await
                    .expect("record")
            }));
        }

        let mut escalation_count = 0;
        for handle in handles {
            if handle.await.expect("join").escalation.is_some() {
                escalation_count += 1;
            }
        }

        assert_eq!(escalation_count, 1);
        assert_eq!(bolos(store.as_ref()).await.len(), 1);
    }
}
