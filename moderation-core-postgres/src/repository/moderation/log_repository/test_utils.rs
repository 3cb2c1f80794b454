use moderation_core_api::domain::Principal;
use moderation_core_db::models::moderation::{
    ActionKind, NewLogEntry, AUTOMATION_AUTHOR_NAME,
};
use moderation_core_db::utils::bounded;
use rand::Rng;

pub(crate) fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range('a'..='z')).collect()
}

/// Unique target name so tests sharing the database stay independent.
pub(crate) fn random_target() -> String {
    format!("target-{}", random_suffix(8))
}

pub(crate) fn test_staff(n: u32) -> Principal {
    Principal::new(&format!("staff-{n}"), &format!("Staff Member {n}"), None)
        .expect("test principal")
}

pub(crate) fn test_entry(author: &Principal, target_name: &str, reason: &str) -> NewLogEntry {
    NewLogEntry::authored(author, None, target_name, ActionKind::Warning, reason)
        .expect("test entry")
}

pub(crate) fn test_bolo(target_name: &str) -> NewLogEntry {
    NewLogEntry {
        author_id: None,
        author_name: Some(bounded(AUTOMATION_AUTHOR_NAME)),
        target_id: None,
        target_name: bounded(target_name),
        action: ActionKind::ActiveBanBolo,
        reason: bounded("Reached 3 previous punishments"),
        prior_offense_count: 3,
        pinned: true,
    }
}
