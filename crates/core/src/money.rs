//! Monetary amounts (decimal arithmetic, no currency).

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A decimal monetary amount.
///
/// Signed: a negative value is representable (a permissive account may be
/// opened with one), but debits never drive a balance below zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// `None` on decimal overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `None` on decimal overflow.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid amount {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_keeps_scale() {
        let m: Money = "12.50".parse().unwrap();
        assert_eq!(m.to_string(), "12.50");
        assert_eq!(" 100 ".parse::<Money>().unwrap(), Money::from(100));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(matches!("ten".parse::<Money>(), Err(DomainError::Validation(_))));
        assert!(matches!("".parse::<Money>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn sign_checks() {
        assert!(Money::from(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!"-0".parse::<Money>().unwrap().is_negative());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from(1)), None);
        assert_eq!(
            Money::from(100).checked_sub(Money::from(30)),
            Some(Money::from(70))
        );
    }
}
