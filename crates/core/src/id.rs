//! Account identifiers and their allocator.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of an account: a positive integer, never reused within an
/// allocator's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(NonZeroU64);

impl AccountId {
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for AccountId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id("AccountId: must be positive"))
    }
}

impl From<AccountId> for u64 {
    fn from(value: AccountId) -> Self {
        value.get()
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("AccountId: {e}")))?;
        Self::try_from(raw)
    }
}

/// Hands out strictly increasing account ids starting at 1.
///
/// Owned by whoever creates accounts (the directory, or a test), so id
/// assignment is deterministic per owner instead of process-global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> DomainResult<AccountId> {
        let id = AccountId::try_from(self.next)?;
        self.next = self
            .next
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("account id space exhausted"))?;
        Ok(id)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_id_is_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate().unwrap().get(), 1);
        assert_eq!(ids.allocate().unwrap().get(), 2);
        assert_eq!(ids.allocated(), 2);
    }

    #[test]
    fn separate_allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        a.allocate().unwrap();
        a.allocate().unwrap();
        assert_eq!(b.allocate().unwrap().get(), 1);
    }

    #[test]
    fn zero_and_garbage_are_rejected() {
        assert!(matches!(AccountId::try_from(0), Err(DomainError::InvalidId(_))));
        assert!(matches!("0".parse::<AccountId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("abc".parse::<AccountId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("-3".parse::<AccountId>(), Err(DomainError::InvalidId(_))));
        assert_eq!(" 7 ".parse::<AccountId>().unwrap().get(), 7);
    }

    proptest! {
        /// Ids are strictly increasing and never repeat.
        #[test]
        fn allocated_ids_strictly_increase(n in 1usize..500) {
            let mut ids = IdAllocator::new();
            let mut prev: Option<AccountId> = None;
            for _ in 0..n {
                let id = ids.allocate().unwrap();
                if let Some(p) = prev {
                    prop_assert!(id > p);
                }
                prev = Some(id);
            }
            prop_assert_eq!(ids.allocated(), n as u64);
        }
    }
}
