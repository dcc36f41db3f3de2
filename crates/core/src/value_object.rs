//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute
/// values. They are immutable: "modifying" one produces a new value.
///
/// ```ignore
/// let a = Money::from(100);
/// let b: Money = "100".parse()?;
/// assert_eq!(a, b); // equal by value
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
