//! # Device Records
//!
//! The registered identity and listing terms for one IoT device. A record
//! is created exactly once, mutated in place by its owner, and never
//! destroyed.

use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, Amount, DeviceId, Timestamp};

/// The mutable listing fields of a device, shared by registration and
/// update.
///
/// `register` consumes one of these to create the record; `update`
/// overwrites all of these fields at once. Owner, registration time, and
/// the active flag are not listing terms — they are managed by the
/// registry.
///
/// No economic validation is performed: zero-price and zero-period
/// listings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Human-readable device name.
    pub name: String,
    /// Free-form classification string (e.g., "air-quality", "soil-moisture").
    pub device_type: String,
    /// Free-form location description.
    pub location: String,
    /// Price of one access period, in the smallest payment unit.
    pub price_per_period: Amount,
    /// Length of one access period, in seconds.
    pub subscription_period_secs: u64,
    /// Opaque pointer to off-market metadata (e.g., a stream descriptor URI).
    pub metadata_uri: String,
}

/// A registered device: immutable identity plus owner-mutable listing terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Unique device identifier. Immutable.
    pub device_id: DeviceId,
    /// Owner's account. Set once at registration; not transferable here.
    pub owner: AccountId,
    /// Human-readable device name.
    pub name: String,
    /// Free-form classification string.
    pub device_type: String,
    /// Free-form location description.
    pub location: String,
    /// Price of one access period, in the smallest payment unit.
    pub price_per_period: Amount,
    /// Length of one access period, in seconds.
    pub subscription_period_secs: u64,
    /// Opaque pointer to off-market metadata.
    pub metadata_uri: String,
    /// Whether the device is discoverable. Toggled by the owner; read-side
    /// consumers filter on this flag.
    pub is_active: bool,
    /// When the device was registered. Immutable.
    pub registered_at: Timestamp,
}

impl DeviceRecord {
    /// Create a record from its listing terms. New devices start active.
    pub(crate) fn new(
        device_id: DeviceId,
        owner: AccountId,
        spec: DeviceSpec,
        now: Timestamp,
    ) -> Self {
        Self {
            device_id,
            owner,
            name: spec.name,
            device_type: spec.device_type,
            location: spec.location,
            price_per_period: spec.price_per_period,
            subscription_period_secs: spec.subscription_period_secs,
            metadata_uri: spec.metadata_uri,
            is_active: true,
            registered_at: now,
        }
    }

    /// Overwrite all listing terms. Owner, registration time, and the
    /// active flag are untouched.
    pub(crate) fn apply_spec(&mut self, spec: DeviceSpec) {
        self.name = spec.name;
        self.device_type = spec.device_type;
        self.location = spec.location;
        self.price_per_period = spec.price_per_period;
        self.subscription_period_secs = spec.subscription_period_secs;
        self.metadata_uri = spec.metadata_uri;
    }
}
