use std::sync::OnceLock;

use sea_orm::{DatabaseTransaction, DbErr};

/// What `with_txn` does with a transaction whose closure succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxnPolicy {
    #[default]
    CommitOnOk,
    /// Test binaries: every successful closure is rolled back.
    RollbackOnOk,
}

impl TxnPolicy {
    /// `"commit"` selects `CommitOnOk`; anything else, including empty, rolls back.
    pub fn from_setting(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("commit") {
            TxnPolicy::CommitOnOk
        } else {
            TxnPolicy::RollbackOnOk
        }
    }

    pub async fn settle(self, txn: DatabaseTransaction) -> Result<(), DbErr> {
        match self {
            TxnPolicy::CommitOnOk => txn.commit().await,
            TxnPolicy::RollbackOnOk => txn.rollback().await,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or_default()
}

/// First call wins for the life of the process.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
