//! The user: a named observer that prints balance changes.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use ledgerbell_events::{AccountObserver, AccountSnapshot};

/// A person watching one or more accounts.
///
/// Names are display labels only; two users may share one.
pub struct User {
    name: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl User {
    /// A user that prints notifications to stdout.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_writer(name, std::io::stdout())
    }

    pub fn with_writer(name: impl Into<String>, out: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AccountObserver for User {
    fn update(&self, snapshot: &AccountSnapshot) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = writeln!(
            out,
            "User {}: Account balance changed to {}",
            self.name, snapshot.balance
        )
        .and_then(|_| out.flush());

        if let Err(err) = written {
            tracing::warn!(user = %self.name, error = %err, "failed to write notification");
        }

        tracing::info!(
            user = %self.name,
            account_id = %snapshot.account_id,
            balance = %snapshot.balance,
            "user notified"
        );
    }
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ledgerbell_core::{AccountId, Money};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn prints_one_line_per_update() {
        let buf = SharedBuf::default();
        let user = User::with_writer("alice", buf.clone());
        let id = AccountId::try_from(1).unwrap();

        user.update(&AccountSnapshot::new(id, Money::from(100), 1));
        user.update(&AccountSnapshot::new(id, "70.50".parse().unwrap(), 2));

        assert_eq!(
            buf.contents(),
            "User alice: Account balance changed to 100\n\
             User alice: Account balance changed to 70.50\n"
        );
        assert_eq!(user.name(), "alice");
    }

    #[test]
    fn stdout_user_keeps_its_name() {
        let user = User::new("bob");
        assert_eq!(user.name(), "bob");
        assert!(format!("{user:?}").contains("bob"));
    }
}
