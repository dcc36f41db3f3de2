//! Ready-made observer kinds.
//!
//! None of these are known to `Account`; they are interchangeable behind
//! [`AccountObserver`].

use std::sync::{Mutex, PoisonError};

use ledgerbell_core::Money;

use crate::bus::EventBus;
use crate::observer::AccountObserver;
use crate::snapshot::AccountSnapshot;

/// Collects every snapshot it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<AccountSnapshot>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last(&self) -> Option<AccountSnapshot> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).last().copied()
    }

    /// Balances in the order they were observed.
    pub fn balances(&self) -> Vec<Money> {
        self.snapshots().iter().map(|s| s.balance).collect()
    }
}

impl AccountObserver for RecordingObserver {
    fn update(&self, snapshot: &AccountSnapshot) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*snapshot);
    }
}

/// Logs every balance change as a structured `tracing` event.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    label: String,
}

impl TracingObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl AccountObserver for TracingObserver {
    fn update(&self, snapshot: &AccountSnapshot) {
        tracing::info!(
            observer = %self.label,
            account_id = %snapshot.account_id,
            balance = %snapshot.balance,
            version = snapshot.version,
            "balance changed"
        );
    }
}

type AlertFn = Box<dyn Fn(&AccountSnapshot) + Send + Sync>;

/// Alerting hook: fires when a balance ends up strictly below `threshold`.
pub struct ThresholdAlert {
    threshold: Money,
    on_alert: AlertFn,
}

impl ThresholdAlert {
    pub fn new<F>(threshold: Money, on_alert: F) -> Self
    where
        F: Fn(&AccountSnapshot) + Send + Sync + 'static,
    {
        Self {
            threshold,
            on_alert: Box::new(on_alert),
        }
    }

    pub fn threshold(&self) -> Money {
        self.threshold
    }
}

impl AccountObserver for ThresholdAlert {
    fn update(&self, snapshot: &AccountSnapshot) {
        if snapshot.balance < self.threshold {
            tracing::warn!(
                account_id = %snapshot.account_id,
                balance = %snapshot.balance,
                threshold = %self.threshold,
                "balance below threshold"
            );
            (self.on_alert)(snapshot);
        }
    }
}

impl core::fmt::Debug for ThresholdAlert {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThresholdAlert")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Forwards snapshots onto an [`EventBus`].
///
/// Publish failures are logged and swallowed: a broken bus never fails the
/// account operation that triggered it.
#[derive(Debug)]
pub struct BusObserver<B> {
    bus: B,
}

impl<B> BusObserver<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B> AccountObserver for BusObserver<B>
where
    B: EventBus<AccountSnapshot>,
{
    fn update(&self, snapshot: &AccountSnapshot) {
        if let Err(err) = self.bus.publish(*snapshot) {
            tracing::warn!(
                account_id = %snapshot.account_id,
                error = %err,
                "failed to publish balance change"
            );
        }
    }
}
