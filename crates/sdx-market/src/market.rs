//! # Marketplace — Single-Writer Facade
//!
//! Ties the device registry, access ledger, and event log together behind
//! one owner. Every mutating entry point takes the authenticated caller
//! and the transaction timestamp from the embedding substrate, executes as
//! one atomic unit, and either fully commits or leaves state untouched.
//!
//! ## Purchase discipline
//!
//! `purchase_access` follows check-effects-interactions: validate the
//! device and payment, write the ledger row, and only then forward funds
//! to the owner through the [`Settlement`] seam. The ledger is finalized
//! before the external interaction, so a reentrant observer during
//! forwarding sees already-updated state; if forwarding fails, the row is
//! restored to its prior value and the operation reports
//! [`MarketError::ForwardingFailed`] with no surviving state change.

use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, Amount, DeviceId, Timestamp};

use crate::access::AccessLedger;
use crate::device::{DeviceRecord, DeviceSpec};
use crate::error::MarketError;
use crate::events::{EventLog, EventRecord, MarketEvent};
use crate::registry::DeviceRegistry;
use crate::settlement::Settlement;

/// How an attached payment is validated against the device price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentPolicy {
    /// The payment must equal the price exactly; overpayment is rejected
    /// like underpayment.
    #[default]
    Exact,
    /// Any payment of at least the price is accepted; the full attached
    /// amount is credited and forwarded (no refund of the excess).
    AtLeast,
}

impl PaymentPolicy {
    /// Whether `offered` satisfies `required` under this policy.
    pub fn accepts(&self, required: Amount, offered: Amount) -> bool {
        match self {
            Self::Exact => offered == required,
            Self::AtLeast => offered >= required,
        }
    }
}

/// The device registry and access subscription ledger, behind a single
/// writer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Marketplace {
    registry: DeviceRegistry,
    ledger: AccessLedger,
    events: EventLog,
    payment_policy: PaymentPolicy,
}

impl Marketplace {
    /// Create an empty marketplace with the default (exact-payment) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty marketplace with the given payment policy.
    pub fn with_policy(payment_policy: PaymentPolicy) -> Self {
        Self {
            payment_policy,
            ..Self::default()
        }
    }

    /// The configured payment policy.
    pub fn payment_policy(&self) -> PaymentPolicy {
        self.payment_policy
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Register a new device owned by `caller` and emit `DeviceRegistered`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::AlreadyRegistered`] if `device_id` already
    /// has a record.
    pub fn register(
        &mut self,
        caller: &AccountId,
        device_id: DeviceId,
        spec: DeviceSpec,
        now: Timestamp,
    ) -> Result<(), MarketError> {
        let event = MarketEvent::DeviceRegistered {
            device_id: device_id.clone(),
            owner: caller.clone(),
            name: spec.name.clone(),
            device_type: spec.device_type.clone(),
            location: spec.location.clone(),
            price_per_period: spec.price_per_period,
            subscription_period_secs: spec.subscription_period_secs,
            metadata_uri: spec.metadata_uri.clone(),
        };
        self.registry.register(caller, device_id, spec, now)?;
        self.events.append(now, event);
        Ok(())
    }

    /// Overwrite the listing terms of a device owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotRegistered`] or [`MarketError::NotOwner`].
    pub fn update(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
        spec: DeviceSpec,
    ) -> Result<(), MarketError> {
        self.registry.update(caller, device_id, spec)?;
        Ok(())
    }

    /// Toggle the discoverability flag of a device owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotRegistered`] or [`MarketError::NotOwner`].
    pub fn set_active(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
        active: bool,
    ) -> Result<(), MarketError> {
        self.registry.set_active(caller, device_id, active)?;
        Ok(())
    }

    /// Purchase one access period for `device_id`, paying `payment`.
    ///
    /// The new expiry is `max(now, current expiry) + period`: an unexpired
    /// subscription keeps its remaining time; a lapsed or first-time one
    /// anchors to `now`. The full payment is forwarded to the device owner
    /// as the final step; on success the new expiry is returned and
    /// `DeviceAccessPurchased` is emitted.
    ///
    /// Deactivated devices accept purchases: `is_active` governs
    /// discoverability only.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotRegistered`] if the device is unknown.
    /// - [`MarketError::InsufficientPayment`] if `payment` does not
    ///   satisfy the price under the configured [`PaymentPolicy`].
    /// - [`MarketError::AmountOverflow`] / [`MarketError::ExpiryOverflow`]
    ///   if the ledger arithmetic is not representable.
    /// - [`MarketError::ForwardingFailed`] if the settlement transfer
    ///   fails; the ledger write is rolled back first.
    pub fn purchase_access<S: Settlement>(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
        payment: Amount,
        now: Timestamp,
        settlement: &mut S,
    ) -> Result<Timestamp, MarketError> {
        let record = self
            .registry
            .get(device_id)
            .ok_or_else(|| MarketError::NotRegistered {
                device_id: device_id.clone(),
            })?;
        let price = record.price_per_period;
        let period_secs = record.subscription_period_secs;
        let owner = record.owner.clone();

        if !self.payment_policy.accepts(price, payment) {
            return Err(MarketError::InsufficientPayment {
                device_id: device_id.clone(),
                required: price,
                offered: payment,
            });
        }

        let new_expiry = self
            .ledger
            .extended_expiry(caller, device_id, now, period_secs)?;

        // Effects before interaction: the ledger row is final before the
        // transfer is attempted, and restored if the transfer fails.
        let prior = self
            .ledger
            .record_purchase(caller, device_id, new_expiry, payment)?;
        if let Err(source) = settlement.forward(&owner, payment) {
            self.ledger.restore(caller, device_id, prior);
            return Err(MarketError::ForwardingFailed {
                owner,
                amount: payment,
                source,
            });
        }

        self.events.append(
            now,
            MarketEvent::DeviceAccessPurchased {
                subscriber: caller.clone(),
                device_id: device_id.clone(),
                amount_paid: payment,
                new_expiry,
            },
        );
        Ok(new_expiry)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The record for a device, if registered.
    pub fn device(&self, device_id: &DeviceId) -> Option<&DeviceRecord> {
        self.registry.get(device_id)
    }

    /// Whether a device identifier has a record.
    pub fn device_exists(&self, device_id: &DeviceId) -> bool {
        self.registry.exists(device_id)
    }

    /// Every device ever registered, in registration order. Grows without
    /// bound.
    pub fn all_devices(&self) -> &[DeviceId] {
        self.registry.all_devices()
    }

    /// The devices registered by `owner`, in registration order.
    pub fn devices_by_owner(&self, owner: &AccountId) -> &[DeviceId] {
        self.registry.devices_by_owner(owner)
    }

    /// The subscription expiry for a pair; `None` if no purchase was ever
    /// accepted.
    pub fn access_expiry(&self, subscriber: &AccountId, device_id: &DeviceId) -> Option<Timestamp> {
        self.ledger.expiry(subscriber, device_id)
    }

    /// Cumulative spend for a pair; zero if no purchase was ever accepted.
    pub fn total_paid(&self, subscriber: &AccountId, device_id: &DeviceId) -> Amount {
        self.ledger.total_paid(subscriber, device_id)
    }

    /// Whether the pair holds an unexpired grant at `now`.
    pub fn has_access(&self, subscriber: &AccountId, device_id: &DeviceId, now: Timestamp) -> bool {
        self.ledger.has_access(subscriber, device_id, now)
    }

    /// The append-only event log, in emission order.
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}
