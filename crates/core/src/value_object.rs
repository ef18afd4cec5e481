//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: they are defined entirely by their
/// attribute values and are never mutated in place. To "change" one, build a
/// new value.
///
/// - **Value Object**: `Money(30)`, a price quote, a happy-hour window
/// - **Entity**: a catalog `Product` (two products with the same id are the same product)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money(u64);
///
/// impl ValueObject for Money {}
///
/// assert_eq!(Money(30), Money(30));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
