//! Lock-guarded accounts for use from several threads.
//!
//! The core account is single-threaded. When accounts are shared, each one
//! sits behind its own mutex and a transfer locks both in ascending id order,
//! so two opposite transfers can never wait on each other.

use std::sync::{Arc, Mutex, MutexGuard};

use ledgerbell_core::{AccountId, DomainError, DomainResult, Money};
use ledgerbell_events::SharedObserver;

use crate::account::{Account, TransferReceipt};

/// Cloneable handle to a mutex-guarded [`Account`].
///
/// Observers run while the account's lock is held; an observer that calls
/// back into the same `SharedAccount` deadlocks.
#[derive(Debug, Clone)]
pub struct SharedAccount {
    id: AccountId,
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            id: account.id_typed(),
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> DomainResult<Money> {
        Ok(self.lock()?.balance())
    }

    pub fn deposit(&self, amount: Money) -> DomainResult<Money> {
        self.lock()?.deposit(amount)
    }

    pub fn withdraw(&self, amount: Money) -> DomainResult<Money> {
        self.lock()?.withdraw(amount)
    }

    pub fn subscribe(&self, observer: SharedObserver) -> DomainResult<()> {
        self.lock()?.subscribe(observer);
        Ok(())
    }

    pub fn unsubscribe(&self, observer: &SharedObserver) -> DomainResult<bool> {
        Ok(self.lock()?.unsubscribe(observer))
    }

    /// Transfer between two shared accounts, locking by ascending id.
    pub fn transfer(
        from: &SharedAccount,
        to: &SharedAccount,
        amount: Money,
    ) -> DomainResult<TransferReceipt> {
        if from.id == to.id {
            return Err(DomainError::validation("cannot transfer to the same account"));
        }

        let source_first = from.id < to.id;
        let (first, second) = if source_first { (from, to) } else { (to, from) };

        let mut first_guard = first.lock()?;
        let mut second_guard = second.lock()?;

        let (source, target) = if source_first {
            (&mut *first_guard, &mut *second_guard)
        } else {
            (&mut *second_guard, &mut *first_guard)
        };

        source.transfer(amount, target)
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Account>> {
        self.inner
            .lock()
            .map_err(|_| DomainError::conflict(format!("account {} lock poisoned", self.id)))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use ledgerbell_core::IdAllocator;
    use ledgerbell_events::RecordingObserver;

    use super::*;
    use crate::account::ValidationPolicy;

    fn shared(ids: &mut IdAllocator, balance: i64) -> SharedAccount {
        SharedAccount::new(
            Account::open(ids.allocate().unwrap(), Money::from(balance), ValidationPolicy::Permissive)
                .unwrap(),
        )
    }

    #[test]
    fn transfer_works_in_both_directions() {
        let mut ids = IdAllocator::new();
        let low = shared(&mut ids, 100);
        let high = shared(&mut ids, 100);

        SharedAccount::transfer(&low, &high, Money::from(30)).unwrap();
        SharedAccount::transfer(&high, &low, Money::from(50)).unwrap();

        assert_eq!(low.balance().unwrap(), Money::from(120));
        assert_eq!(high.balance().unwrap(), Money::from(80));
    }

    #[test]
    fn self_transfer_is_rejected() {
        let mut ids = IdAllocator::new();
        let a = shared(&mut ids, 100);
        let alias = a.clone();

        let err = SharedAccount::transfer(&a, &alias, Money::from(1)).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(a.balance().unwrap(), Money::from(100));
    }

    #[test]
    fn concurrent_opposite_transfers_conserve_total() {
        let mut ids = IdAllocator::new();
        let a = shared(&mut ids, 10_000);
        let b = shared(&mut ids, 10_000);
        let recorder = Arc::new(RecordingObserver::new());
        a.subscribe(recorder.clone()).unwrap();
        b.subscribe(recorder.clone()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (a, b) = (a.clone(), b.clone());
                thread::spawn(move || {
                    for _ in 0..200 {
                        let (from, to) = if i % 2 == 0 { (&a, &b) } else { (&b, &a) };
                        let _ = SharedAccount::transfer(from, to, Money::from(7));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let total = a
            .balance()
            .unwrap()
            .checked_add(b.balance().unwrap())
            .unwrap();
        assert_eq!(total, Money::from(20_000));
        assert!(!a.balance().unwrap().is_negative());
        assert!(!b.balance().unwrap().is_negative());
        // Each successful transfer notifies both sides once.
        assert_eq!(recorder.count() % 2, 0);
    }
}
