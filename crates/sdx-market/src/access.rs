//! # Access Subscription Ledger
//!
//! Per (subscriber, device) rows tracking subscription expiry and
//! cumulative spend. A row is created on the first successful purchase and
//! updated on every subsequent one; rows persist past expiry as historical
//! records and are never deleted.
//!
//! ## Invariants
//!
//! - `expiry` is monotonically non-decreasing across successive purchases
//!   for the same pair: renewal extends from `max(now, current expiry)`,
//!   so remaining time on an unexpired subscription is preserved.
//! - `total_paid` is monotonically non-decreasing and equals the sum of
//!   every accepted payment for the pair. Addition is checked.
//! - "Expired" is a derived condition (`now >= expiry`), never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, Amount, DeviceId, Timestamp};

use crate::error::MarketError;

/// One ledger row: the granted window and cumulative spend for a
/// (subscriber, device) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    /// End of the granted access window.
    pub expiry: Timestamp,
    /// Sum of every accepted payment for this pair.
    pub total_paid: Amount,
}

/// The access subscription ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessLedger {
    /// Rows keyed by subscriber, then device.
    entries: BTreeMap<AccountId, BTreeMap<DeviceId, AccessEntry>>,
}

impl AccessLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The row for a (subscriber, device) pair, if one exists.
    pub fn entry(&self, subscriber: &AccountId, device_id: &DeviceId) -> Option<&AccessEntry> {
        self.entries.get(subscriber)?.get(device_id)
    }

    /// The subscription expiry for a pair; `None` if no purchase was ever
    /// accepted.
    pub fn expiry(&self, subscriber: &AccountId, device_id: &DeviceId) -> Option<Timestamp> {
        self.entry(subscriber, device_id).map(|e| e.expiry)
    }

    /// Cumulative spend for a pair; zero if no purchase was ever accepted.
    pub fn total_paid(&self, subscriber: &AccountId, device_id: &DeviceId) -> Amount {
        self.entry(subscriber, device_id)
            .map(|e| e.total_paid)
            .unwrap_or(Amount::ZERO)
    }

    /// Whether the pair holds an unexpired grant at `now`.
    ///
    /// Derived, not stored: time passing mutates nothing.
    pub fn has_access(&self, subscriber: &AccountId, device_id: &DeviceId, now: Timestamp) -> bool {
        match self.expiry(subscriber, device_id) {
            Some(expiry) => now < expiry,
            None => false,
        }
    }

    // ── Expiry arithmetic ────────────────────────────────────────────

    /// Compute the expiry a purchase at `now` would produce:
    /// `max(now, current expiry) + period`.
    ///
    /// An unexpired subscription keeps its remaining time; a lapsed or
    /// first-time subscription anchors to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ExpiryOverflow`] if the result is not
    /// representable.
    pub fn extended_expiry(
        &self,
        subscriber: &AccountId,
        device_id: &DeviceId,
        now: Timestamp,
        period_secs: u64,
    ) -> Result<Timestamp, MarketError> {
        let anchor = match self.expiry(subscriber, device_id) {
            Some(current) if current > now => current,
            _ => now,
        };
        anchor
            .checked_add_secs(period_secs)
            .ok_or_else(|| MarketError::ExpiryOverflow {
                device_id: device_id.clone(),
            })
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Write an accepted purchase into the ledger: set the expiry and add
    /// the payment to cumulative spend.
    ///
    /// Returns the prior row (if any) so the caller can roll this write
    /// back if the subsequent settlement interaction fails.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::AmountOverflow`] if the payment would
    /// overflow `total_paid`; the ledger is untouched in that case.
    pub fn record_purchase(
        &mut self,
        subscriber: &AccountId,
        device_id: &DeviceId,
        new_expiry: Timestamp,
        payment: Amount,
    ) -> Result<Option<AccessEntry>, MarketError> {
        let prior = self.entry(subscriber, device_id).copied();
        let prior_total = prior.map(|e| e.total_paid).unwrap_or(Amount::ZERO);
        let total_paid = prior_total
            .checked_add(payment)
            .ok_or_else(|| MarketError::AmountOverflow {
                device_id: device_id.clone(),
            })?;
        self.entries
            .entry(subscriber.clone())
            .or_default()
            .insert(
                device_id.clone(),
                AccessEntry {
                    expiry: new_expiry,
                    total_paid,
                },
            );
        Ok(prior)
    }

    /// Restore a row to its pre-purchase state after a failed settlement
    /// interaction. `prior = None` removes the row that the rolled-back
    /// purchase created.
    pub fn restore(
        &mut self,
        subscriber: &AccountId,
        device_id: &DeviceId,
        prior: Option<AccessEntry>,
    ) {
        match prior {
            Some(entry) => {
                self.entries
                    .entry(subscriber.clone())
                    .or_default()
                    .insert(device_id.clone(), entry);
            }
            None => {
                if let Some(rows) = self.entries.get_mut(subscriber) {
                    rows.remove(device_id);
                    if rows.is_empty() {
                        self.entries.remove(subscriber);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    fn device(s: &str) -> DeviceId {
        DeviceId::new(s).unwrap()
    }

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    const WEEK: u64 = 604_800;

    // ── Queries on an empty ledger ───────────────────────────────────

    #[test]
    fn test_empty_ledger_reports_no_access() {
        let ledger = AccessLedger::new();
        assert_eq!(ledger.expiry(&account("bob"), &device("d1")), None);
        assert_eq!(ledger.total_paid(&account("bob"), &device("d1")), Amount::ZERO);
        assert!(!ledger.has_access(&account("bob"), &device("d1"), t(0)));
    }

    // ── Expiry arithmetic ────────────────────────────────────────────

    #[test]
    fn test_first_purchase_anchors_to_now() {
        let ledger = AccessLedger::new();
        let expiry = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(0), WEEK)
            .unwrap();
        assert_eq!(expiry, t(WEEK as i64));
    }

    #[test]
    fn test_renewal_before_expiry_preserves_remaining_time() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(WEEK as i64), Amount::new(1))
            .unwrap();
        // Renew at t=100_000, well before the week is up.
        let expiry = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(100_000), WEEK)
            .unwrap();
        assert_eq!(expiry, t(2 * WEEK as i64));
    }

    #[test]
    fn test_renewal_after_expiry_anchors_to_now() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(WEEK as i64), Amount::new(1))
            .unwrap();
        let late = WEEK as i64 + 50_000;
        let expiry = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(late), WEEK)
            .unwrap();
        assert_eq!(expiry, t(late + WEEK as i64));
    }

    #[test]
    fn test_renewal_exactly_at_expiry_anchors_to_now() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(100), Amount::new(1))
            .unwrap();
        let expiry = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(100), 50)
            .unwrap();
        assert_eq!(expiry, t(150));
    }

    #[test]
    fn test_zero_period_expiry_equals_now() {
        let ledger = AccessLedger::new();
        let expiry = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(42), 0)
            .unwrap();
        assert_eq!(expiry, t(42));
    }

    #[test]
    fn test_expiry_overflow_is_error() {
        let ledger = AccessLedger::new();
        let err = ledger
            .extended_expiry(&account("bob"), &device("d1"), t(0), u64::MAX)
            .unwrap_err();
        assert!(matches!(err, MarketError::ExpiryOverflow { .. }));
    }

    // ── record_purchase / totals ─────────────────────────────────────

    #[test]
    fn test_record_purchase_accumulates_total_paid() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(7))
            .unwrap();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(20), Amount::new(7))
            .unwrap();
        assert_eq!(ledger.total_paid(&account("bob"), &device("d1")), Amount::new(14));
        assert_eq!(ledger.expiry(&account("bob"), &device("d1")), Some(t(20)));
    }

    #[test]
    fn test_record_purchase_returns_prior_row() {
        let mut ledger = AccessLedger::new();
        let first = ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(7))
            .unwrap();
        assert_eq!(first, None);
        let second = ledger
            .record_purchase(&account("bob"), &device("d1"), t(20), Amount::new(7))
            .unwrap();
        assert_eq!(
            second,
            Some(AccessEntry {
                expiry: t(10),
                total_paid: Amount::new(7)
            })
        );
    }

    #[test]
    fn test_total_paid_overflow_leaves_ledger_untouched() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(u128::MAX))
            .unwrap();
        let err = ledger
            .record_purchase(&account("bob"), &device("d1"), t(20), Amount::new(1))
            .unwrap_err();
        assert!(matches!(err, MarketError::AmountOverflow { .. }));
        assert_eq!(ledger.expiry(&account("bob"), &device("d1")), Some(t(10)));
    }

    #[test]
    fn test_pairs_are_independent() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(1))
            .unwrap();
        assert_eq!(ledger.expiry(&account("bob"), &device("d2")), None);
        assert_eq!(ledger.expiry(&account("carol"), &device("d1")), None);
    }

    // ── has_access boundary ──────────────────────────────────────────

    #[test]
    fn test_has_access_boundary_is_exclusive() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(100), Amount::new(1))
            .unwrap();
        assert!(ledger.has_access(&account("bob"), &device("d1"), t(99)));
        assert!(!ledger.has_access(&account("bob"), &device("d1"), t(100)));
        assert!(!ledger.has_access(&account("bob"), &device("d1"), t(101)));
    }

    // ── restore ──────────────────────────────────────────────────────

    #[test]
    fn test_restore_prior_row() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(7))
            .unwrap();
        let prior = ledger
            .record_purchase(&account("bob"), &device("d1"), t(20), Amount::new(7))
            .unwrap();
        ledger.restore(&account("bob"), &device("d1"), prior);
        assert_eq!(ledger.expiry(&account("bob"), &device("d1")), Some(t(10)));
        assert_eq!(ledger.total_paid(&account("bob"), &device("d1")), Amount::new(7));
    }

    #[test]
    fn test_restore_none_removes_created_row() {
        let mut ledger = AccessLedger::new();
        let prior = ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(7))
            .unwrap();
        ledger.restore(&account("bob"), &device("d1"), prior);
        assert_eq!(ledger.entry(&account("bob"), &device("d1")), None);
        // Roundtrips to the same serialized form as a fresh ledger.
        assert_eq!(
            serde_json::to_string(&ledger).unwrap(),
            serde_json::to_string(&AccessLedger::new()).unwrap()
        );
    }

    // ── serde ────────────────────────────────────────────────────────

    #[test]
    fn test_ledger_serde_roundtrip() {
        let mut ledger = AccessLedger::new();
        ledger
            .record_purchase(&account("bob"), &device("d1"), t(10), Amount::new(7))
            .unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let parsed: AccessLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.entry(&account("bob"), &device("d1")),
            ledger.entry(&account("bob"), &device("d1"))
        );
    }
}
