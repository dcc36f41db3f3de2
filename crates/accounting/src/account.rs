use serde::{Deserialize, Serialize};

use ledgerbell_core::{AccountId, AggregateRoot, DomainError, DomainResult, Money};
use ledgerbell_events::{AccountSnapshot, ObserverRegistry, SharedObserver};

/// How strictly an account checks the sign of incoming amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Any decimal is accepted: a negative opening balance, and negative
    /// deposit/withdraw/transfer amounts (which move money the other way
    /// without a funds check on the receiving side).
    #[default]
    Permissive,
    /// Negative opening balances and negative amounts are rejected.
    Strict,
}

impl ValidationPolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

/// Outcome of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub source: AccountId,
    pub target: AccountId,
    pub amount: Money,
    pub source_balance: Money,
    pub target_balance: Money,
}

/// Aggregate root: Account.
///
/// The account is the only mutator of its balance. Every successful mutation
/// bumps `version` and then notifies the registered observers; a rejected
/// operation changes nothing and notifies nobody.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: Money,
    policy: ValidationPolicy,
    version: u64,
    observers: ObserverRegistry,
}

impl Account {
    /// Open an account with an id handed out by the caller's allocator.
    pub fn open(
        id: AccountId,
        initial_balance: Money,
        policy: ValidationPolicy,
    ) -> DomainResult<Self> {
        if policy.is_strict() && initial_balance.is_negative() {
            return Err(DomainError::validation("initial balance cannot be negative"));
        }

        tracing::debug!(account_id = %id, balance = %initial_balance, ?policy, "account opened");

        Ok(Self {
            id,
            balance: initial_balance,
            policy,
            version: 0,
            observers: ObserverRegistry::new(),
        })
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Read-only view handed to observers.
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot::new(self.id, self.balance, self.version)
    }

    /// Add `amount` and notify. Returns the new balance.
    pub fn deposit(&mut self, amount: Money) -> DomainResult<Money> {
        self.check_amount(amount, "deposit")?;
        let new_balance = self.credited(amount)?;
        self.apply_credit(new_balance);
        tracing::debug!(account_id = %self.id, %amount, balance = %new_balance, "deposit");
        Ok(new_balance)
    }

    /// Subtract `amount` and notify, if the balance covers it.
    ///
    /// On insufficient funds nothing changes and no observer is notified.
    pub fn withdraw(&mut self, amount: Money) -> DomainResult<Money> {
        self.check_amount(amount, "withdraw")?;
        self.ensure_funds(amount)?;
        let new_balance = self.debited(amount)?;
        self.commit(new_balance);
        self.notify();
        tracing::debug!(account_id = %self.id, %amount, balance = %new_balance, "withdraw");
        Ok(new_balance)
    }

    /// Move `amount` from this account to `target`.
    ///
    /// The funds check runs once, on this account, before anything changes.
    /// Once it passes, the target is credited and its observers notified,
    /// then this account's observers are notified. When it fails neither
    /// account changes and neither side is notified.
    pub fn transfer(&mut self, amount: Money, target: &mut Account) -> DomainResult<TransferReceipt> {
        self.check_amount(amount, "transfer")?;
        target.check_amount(amount, "transfer")?;
        self.ensure_funds(amount)?;

        let source_balance = self.debited(amount)?;
        let target_balance = target.credited(amount)?;

        self.commit(source_balance);
        target.apply_credit(target_balance);
        self.notify();

        tracing::debug!(
            source = %self.id,
            target = %target.id,
            %amount,
            source_balance = %source_balance,
            target_balance = %target_balance,
            "transfer"
        );

        Ok(TransferReceipt {
            source: self.id,
            target: target.id,
            amount,
            source_balance,
            target_balance,
        })
    }

    pub fn subscribe(&mut self, observer: SharedObserver) {
        self.observers.subscribe(observer);
    }

    /// Remove the first registration of `observer`. Returns whether one was found.
    pub fn unsubscribe(&mut self, observer: &SharedObserver) -> bool {
        self.observers.unsubscribe(observer)
    }

    /// Deliver the current state to every observer, in subscription order.
    pub fn notify(&self) {
        self.observers.notify_all(&self.snapshot());
    }

    fn check_amount(&self, amount: Money, op: &str) -> DomainResult<()> {
        if self.policy.is_strict() && amount.is_negative() {
            return Err(DomainError::validation(format!("{op} amount cannot be negative")));
        }
        Ok(())
    }

    fn ensure_funds(&self, amount: Money) -> DomainResult<()> {
        if amount > self.balance {
            tracing::debug!(
                account_id = %self.id,
                requested = %amount,
                available = %self.balance,
                "debit rejected: insufficient funds"
            );
            return Err(DomainError::insufficient_funds(amount, self.balance));
        }
        Ok(())
    }

    fn credited(&self, amount: Money) -> DomainResult<Money> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| DomainError::invariant("balance overflow"))
    }

    fn debited(&self, amount: Money) -> DomainResult<Money> {
        self.balance
            .checked_sub(amount)
            .ok_or_else(|| DomainError::invariant("balance overflow"))
    }

    fn apply_credit(&mut self, new_balance: Money) {
        self.commit(new_balance);
        self.notify();
    }

    fn commit(&mut self, new_balance: Money) {
        self.balance = new_balance;
        self.version += 1;
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
