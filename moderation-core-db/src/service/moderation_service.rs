use std::sync::Arc;

use moderation_core_api::domain::{AccessTier, Principal};
use moderation_core_api::error::{ModerationError, ModerationResult};
use moderation_core_api::service::{AccessDecision, AccessGate, MembershipDirectory};
use serde::Deserialize;
use validator::Validate;

use crate::engine::escalation::{EscalationEngine, EscalationOutcome};
use crate::models::moderation::{ActionKind, ActivityEntryModel, LogEntryModel, NewActivityEntry, NewLogEntry};
use crate::repository::complete_log::{CompleteLog, CompleteOutcome};
use crate::repository::count_offenses::CountOffenses;
use crate::repository::create_log::CreateLog;
use crate::repository::delete_log::{DeleteLog, DeleteOutcome};
use crate::repository::load_recent_activity::LoadRecentActivity;
use crate::repository::load_recent_logs::LoadRecentLogs;
use crate::repository::pagination::PageRequest;
use crate::repository::record_activity::RecordActivity;

/// Input for creating a moderation log entry, as submitted by the
/// dashboard form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLogRequest {
    #[validate(length(min = 1, max = 32))]
    pub target_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub target_name: String,

    #[validate(length(min = 1, max = 48))]
    pub action: String,

    #[validate(length(min = 1, max = 400))]
    pub reason: String,
}

/// Gated facade over the moderation log and activity streams.
///
/// Every exposed operation checks the caller against the tier rules
/// before touching storage: Staff creates, lists and completes entries;
/// HumanResources alone deletes them and reads the activity stream.
pub struct ModerationService<D, L, A>
where
    D: MembershipDirectory,
    L: CreateLog + LoadRecentLogs + CountOffenses + CompleteLog + DeleteLog,
    A: RecordActivity + LoadRecentActivity,
{
    gate: AccessGate<D>,
    logs: Arc<L>,
    activity: Arc<A>,
    escalation: EscalationEngine,
}

impl<D, L, A> ModerationService<D, L, A>
where
    D: MembershipDirectory,
    L: CreateLog + LoadRecentLogs + CountOffenses + CompleteLog + DeleteLog,
    A: RecordActivity + LoadRecentActivity,
{
    pub fn new(gate: AccessGate<D>, logs: Arc<L>, activity: Arc<A>) -> Self {
        ModerationService {
            gate,
            logs,
            activity,
            escalation: EscalationEngine::new(),
        }
    }

    /// Authorization decision for a thin surface such as the dispatch
    /// page, which exposes nothing beyond the tier check itself.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        tier: AccessTier,
    ) -> AccessDecision {
        self.gate.authorize(principal, tier).await
    }

    /// Create a staff-authored log entry and run the escalation policy.
    pub async fn create_log(
        &self,
        principal: Option<&Principal>,
        request: CreateLogRequest,
    ) -> ModerationResult<EscalationOutcome> {
        let author = self.require_tier(principal, AccessTier::Staff).await?;
        request
            .validate()
            .map_err(|e| ModerationError::ValidationError(e.to_string()))?;

        let action = request
            .action
            .parse::<ActionKind>()
            .map_err(|_| ModerationError::ValidationError("unreadable action kind".to_string()))?;
        let entry = NewLogEntry::authored(
            author,
            request.target_id.as_deref(),
            &request.target_name,
            action,
            &request.reason,
        )?;

        let outcome = self
            .escalation
            .record(self.logs.as_ref(), entry)
            .await
            .map_err(storage_error)?;

        self.note_activity(
            author,
            &format!(
                "Created log #{} ({}) for {}",
                outcome.entry.id, outcome.entry.action, outcome.entry.target_name
            ),
        )
        .await;
        Ok(outcome)
    }

    /// Current page of the moderation log, pinned entries first.
    pub async fn list_logs(
        &self,
        principal: Option<&Principal>,
        page: PageRequest,
    ) -> ModerationResult<Vec<LogEntryModel>> {
        self.require_tier(principal, AccessTier::Staff).await?;
        self.logs.load_recent_logs(page).await.map_err(storage_error)
    }

    /// Complete a ban BOLO. Staff tier; any state other than
    /// `ActiveBanBolo` reports `InvalidTransition` and changes nothing.
    pub async fn complete_log(
        &self,
        principal: Option<&Principal>,
        id: i64,
    ) -> ModerationResult<CompleteOutcome> {
        let actor = self.require_tier(principal, AccessTier::Staff).await?;
        let outcome = self
            .logs
            .complete_log(id, actor)
            .await
            .map_err(storage_error)?;

        if let CompleteOutcome::Completed(entry) = &outcome {
            self.note_activity(
                actor,
                &format!("Completed ban BOLO #{} for {}", entry.id, entry.target_name),
            )
            .await;
        }
        Ok(outcome)
    }

    /// Delete one entry. HumanResources only, a stricter tier than
    /// creation.
    pub async fn delete_log(
        &self,
        principal: Option<&Principal>,
        id: i64,
    ) -> ModerationResult<DeleteOutcome> {
        let actor = self
            .require_tier(principal, AccessTier::HumanResources)
            .await?;
        let outcome = self.logs.delete_log(id).await.map_err(storage_error)?;

        if outcome == DeleteOutcome::Deleted {
            self.note_activity(actor, &format!("Deleted log #{id}")).await;
        }
        Ok(outcome)
    }

    /// Recent staff activity, newest first. HumanResources only.
    pub async fn list_activity(
        &self,
        principal: Option<&Principal>,
        page: PageRequest,
    ) -> ModerationResult<Vec<ActivityEntryModel>> {
        self.require_tier(principal, AccessTier::HumanResources)
            .await?;
        self.activity
            .load_recent_activity(page)
            .await
            .map_err(storage_error)
    }

    async fn require_tier<'a>(
        &self,
        principal: Option<&'a Principal>,
        tier: AccessTier,
    ) -> ModerationResult<&'a Principal> {
        match (self.gate.authorize(principal, tier).await, principal) {
            (AccessDecision::Allowed, Some(actor)) => Ok(actor),
            (AccessDecision::Unauthenticated, _) | (_, None) => {
                Err(ModerationError::AuthenticationMissing)
            }
            (AccessDecision::Denied, _) => {
                Err(ModerationError::AuthorizationDenied(tier.to_string()))
            }
        }
    }

    /// Best-effort oversight note: failures are logged and never fail or
    /// roll back the moderation mutation they accompany.
    async fn note_activity(&self, actor: &Principal, description: &str) {
        let note = NewActivityEntry::for_actor(actor, description);
        if let Err(err) = self.activity.record_activity(note).await {
            tracing::warn!(
                actor_id = actor.id.as_str(),
                error = %err,
                "failed to record staff activity"
            );
        }
    }
}

fn storage_error(err: Box<dyn std::error::Error + Send + Sync>) -> ModerationError {
    ModerationError::StorageError(err.to_string())
}
