use tokio::sync::{Mutex, MutexGuard};

use crate::utils::target_name_hash;

const STRIPE_COUNT: usize = 64;

fn stripe_index(target_name: &str) -> usize {
    (target_name_hash(target_name) as u64 % STRIPE_COUNT as u64) as usize
}

/// Striped locks keyed by normalized target name.
///
/// One stripe serializes the count-then-insert escalation sequence for
/// every target that hashes onto it; unrelated targets proceed in
/// parallel on other stripes.
pub(crate) struct TargetLocks {
    stripes: Vec<Mutex<()>>,
}

impl TargetLocks {
    pub(crate) fn new() -> Self {
        TargetLocks {
            stripes: (0..STRIPE_COUNT).map(|_| Mutex::new(())).collect(),
        }
    }

    pub(crate) async fn lock(&self, target_name: &str) -> MutexGuard<'_, ()> {
        self.stripes[stripe_index(target_name)].lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differently_cased_spellings_share_a_stripe() {
        assert_eq!(stripe_index("Alice"), stripe_index("aLiCe"));
    }

    #[tokio::test]
    async fn test_holding_a_target_lock_blocks_the_same_target() {
        let locks = TargetLocks::new();
        let _guard = locks.lock("Alice").await;
        assert!(locks.stripes[stripe_index("alice")].try_lock().is_err());
    }
}
