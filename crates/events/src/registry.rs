//! Per-account list of subscribed observers.

use crate::observer::{SharedObserver, same_observer};
use crate::snapshot::AccountSnapshot;

/// Ordered observer list.
///
/// - insertion order is notification order
/// - duplicates are allowed (each entry is notified)
/// - `unsubscribe` removes the first matching entry only
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<SharedObserver>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: SharedObserver) {
        self.observers.push(observer);
    }

    /// Remove the first entry that is the same handle as `observer`.
    ///
    /// Returns whether an entry was removed.
    pub fn unsubscribe(&mut self, observer: &SharedObserver) -> bool {
        match self
            .observers
            .iter()
            .position(|o| same_observer(o, observer))
        {
            Some(idx) => {
                self.observers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Deliver `snapshot` to every registered observer.
    ///
    /// Iterates over a copy of the handle list taken up front, so the set of
    /// recipients is fixed for the duration of the call.
    pub fn notify_all(&self, snapshot: &AccountSnapshot) {
        let recipients = self.observers.clone();
        for observer in &recipients {
            observer.update(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn contains(&self, observer: &SharedObserver) -> bool {
        self.observers.iter().any(|o| same_observer(o, observer))
    }
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ledgerbell_core::{AccountId, Money};

    use super::*;
    use crate::observers::RecordingObserver;

    fn snapshot(balance: i64) -> AccountSnapshot {
        AccountSnapshot::new(AccountId::try_from(1).unwrap(), Money::from(balance), 1)
    }

    #[test]
    fn notifies_in_subscription_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        struct Tagged(&'static str, Arc<std::sync::Mutex<Vec<&'static str>>>);
        impl crate::AccountObserver for Tagged {
            fn update(&self, _: &AccountSnapshot) {
                self.1.lock().unwrap().push(self.0);
            }
        }

        let mut registry = ObserverRegistry::new();
        registry.subscribe(Arc::new(Tagged("first", order.clone())));
        registry.subscribe(Arc::new(Tagged("second", order.clone())));
        registry.subscribe(Arc::new(Tagged("third", order.clone())));

        registry.notify_all(&snapshot(5));

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicates_are_notified_and_removed_one_at_a_time() {
        let recorder = Arc::new(RecordingObserver::new());
        let handle: SharedObserver = recorder.clone();

        let mut registry = ObserverRegistry::new();
        registry.subscribe(handle.clone());
        registry.subscribe(handle.clone());
        assert_eq!(registry.len(), 2);

        registry.notify_all(&snapshot(10));
        assert_eq!(recorder.count(), 2);

        assert!(registry.unsubscribe(&handle));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&handle));

        registry.notify_all(&snapshot(20));
        assert_eq!(recorder.count(), 3);

        assert!(registry.unsubscribe(&handle));
        assert!(!registry.unsubscribe(&handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_matches_identity_not_type() {
        let a: SharedObserver = Arc::new(RecordingObserver::new());
        let b: SharedObserver = Arc::new(RecordingObserver::new());

        let mut registry = ObserverRegistry::new();
        registry.subscribe(a.clone());

        assert!(!registry.unsubscribe(&b));
        assert_eq!(registry.len(), 1);
        assert!(registry.unsubscribe(&a));
    }
}
