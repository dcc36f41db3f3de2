//! Read-only view of an account handed to observers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerbell_core::{AccountId, Money};

use crate::event::Event;

/// State of an account right after a successful balance mutation.
///
/// Observers receive this instead of the account itself, so the account
/// stays the only thing able to change its balance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_id: AccountId,
    pub balance: Money,
    /// Aggregate version after the mutation.
    pub version: u64,
    pub occurred_at: DateTime<Utc>,
}

impl AccountSnapshot {
    pub fn new(account_id: AccountId, balance: Money, version: u64) -> Self {
        Self {
            account_id,
            balance,
            version,
            occurred_at: Utc::now(),
        }
    }
}

impl Event for AccountSnapshot {
    fn event_type(&self) -> &'static str {
        "ledger.account.balance_changed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_itself_as_a_balance_change() {
        let before = Utc::now();
        let snapshot = AccountSnapshot::new(AccountId::try_from(4).unwrap(), Money::from(12), 3);

        assert_eq!(snapshot.event_type(), "ledger.account.balance_changed");
        assert_eq!(Event::version(&snapshot), 1);
        assert_eq!(snapshot.version, 3);
        assert!(snapshot.occurred_at() >= before);
    }
}
