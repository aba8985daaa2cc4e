//! # Amount — Integer Payment Amounts
//!
//! Defines `Amount`, the payment quantity used throughout the SDX Stack,
//! denominated in the smallest payment unit of the settlement substrate.
//!
//! ## Security Invariant
//!
//! Amounts are integers, never floats, and addition is checked. The
//! cumulative-spend accounting in the access ledger must be exact; a
//! wrapped sum would corrupt the monotonic `total_paid` invariant.

use serde::{Deserialize, Serialize};

/// A payment amount in the smallest unit of the settlement substrate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Construct an amount from a raw unit count.
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// The raw unit count.
    pub const fn units(&self) -> u128 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ZERO.units(), 0);
    }

    #[test]
    fn test_checked_add() {
        let a = Amount::new(1_000_000_000_000_000);
        let b = a.checked_add(a).unwrap();
        assert_eq!(b.units(), 2_000_000_000_000_000);
    }

    #[test]
    fn test_checked_add_overflow_is_none() {
        let max = Amount::new(u128::MAX);
        assert_eq!(max.checked_add(Amount::new(1)), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Amount::new(1) < Amount::new(2));
        assert_eq!(Amount::new(5), Amount::from(5));
    }

    #[test]
    fn test_display_is_unit_count() {
        assert_eq!(Amount::new(604_800).to_string(), "604800");
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = Amount::new(1_000_000_000_000_000);
        let json = serde_json::to_string(&a).unwrap();
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }
}
