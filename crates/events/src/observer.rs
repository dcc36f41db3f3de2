//! The observer capability.

use std::sync::Arc;

use crate::snapshot::AccountSnapshot;

/// Anything that reacts to an account's balance change.
///
/// `update` runs synchronously inside the mutating call, in subscription
/// order. Implementations must not call back into the account they observe:
/// when the account sits behind a lock (see `SharedAccount`) that deadlocks.
pub trait AccountObserver: Send + Sync {
    fn update(&self, snapshot: &AccountSnapshot);
}

/// Shared observer handle stored in registries.
///
/// The same handle may be subscribed to many accounts; the observer's
/// lifetime is independent of any of them.
pub type SharedObserver = Arc<dyn AccountObserver>;

/// Identity comparison for observer handles (same allocation).
///
/// Compares data addresses only; vtable pointers for the same type may
/// differ between codegen units.
pub fn same_observer(a: &SharedObserver, b: &SharedObserver) -> bool {
    core::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
