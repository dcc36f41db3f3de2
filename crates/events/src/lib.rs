//! Balance-change events and the observer machinery that delivers them.
//!
//! Accounts publish an [`AccountSnapshot`] after every successful mutation.
//! Anything implementing [`AccountObserver`] can subscribe; the account only
//! ever sees the trait object.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod observer;
pub mod observers;
pub mod registry;
pub mod snapshot;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use observer::{AccountObserver, SharedObserver, same_observer};
pub use observers::{BusObserver, RecordingObserver, ThresholdAlert, TracingObserver};
pub use registry::ObserverRegistry;
pub use snapshot::AccountSnapshot;
