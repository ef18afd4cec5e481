//! Monetary amounts.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A price or deposit in whole euros.
///
/// Catalog feeds quote every amount in whole currency units, so there is no
/// minor-unit component.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Money {}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "€{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_euro_sign() {
        assert_eq!(Money::new(30).to_string(), "€30");
        assert_eq!(Money::ZERO.to_string(), "€0");
    }

    #[test]
    fn deserializes_from_plain_number() {
        let m: Money = serde_json::from_str("200").unwrap();
        assert_eq!(m, Money::new(200));
        assert!(serde_json::from_str::<Money>("-5").is_err());
    }
}
