//! # Device Registry
//!
//! Persistent map from device identifier to its record, plus two
//! append-only indices: the global registration order and the per-owner
//! registration order. Indices only ever grow; deactivated devices stay
//! listed and read-side consumers filter by `is_active`.
//!
//! ## Invariants
//!
//! - A device identifier is assigned at most one record for the lifetime
//!   of the registry; registration is exactly-once and irreversible.
//! - Only the recorded owner may mutate a record.
//! - `all_devices` and `devices_by_owner` hold every registered identifier
//!   in registration order and never shrink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, DeviceId, Timestamp};

use crate::device::{DeviceRecord, DeviceSpec};
use crate::error::MarketError;

/// The device store and its registration controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRegistry {
    /// All device records, keyed by identifier.
    devices: BTreeMap<DeviceId, DeviceRecord>,
    /// Every registered identifier, in registration order. Append-only.
    all_devices: Vec<DeviceId>,
    /// Registered identifiers per owner, in registration order. Append-only.
    devices_by_owner: BTreeMap<AccountId, Vec<DeviceId>>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Register a new device owned by `caller`.
    ///
    /// The record starts active and is appended to both indices.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::AlreadyRegistered`] if the identifier
    /// already has a record.
    pub fn register(
        &mut self,
        caller: &AccountId,
        device_id: DeviceId,
        spec: DeviceSpec,
        now: Timestamp,
    ) -> Result<&DeviceRecord, MarketError> {
        if self.devices.contains_key(&device_id) {
            return Err(MarketError::AlreadyRegistered { device_id });
        }
        let record = DeviceRecord::new(device_id.clone(), caller.clone(), spec, now);
        self.all_devices.push(device_id.clone());
        self.devices_by_owner
            .entry(caller.clone())
            .or_default()
            .push(device_id.clone());
        Ok(self.devices.entry(device_id).or_insert(record))
    }

    /// Overwrite the listing terms of an existing device.
    ///
    /// Owner, registration time, and the active flag are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotRegistered`] for an unknown identifier,
    /// [`MarketError::NotOwner`] if `caller` is not the recorded owner.
    pub fn update(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
        spec: DeviceSpec,
    ) -> Result<&DeviceRecord, MarketError> {
        let record = self.owned_mut(caller, device_id)?;
        record.apply_spec(spec);
        Ok(record)
    }

    /// Toggle a device's discoverability flag. Owner-only.
    ///
    /// The device stays in both indices regardless of the flag.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotRegistered`] for an unknown identifier,
    /// [`MarketError::NotOwner`] if `caller` is not the recorded owner.
    pub fn set_active(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
        active: bool,
    ) -> Result<&DeviceRecord, MarketError> {
        let record = self.owned_mut(caller, device_id)?;
        record.is_active = active;
        Ok(record)
    }

    /// Look up a record mutably, enforcing the owner-only invariant.
    fn owned_mut(
        &mut self,
        caller: &AccountId,
        device_id: &DeviceId,
    ) -> Result<&mut DeviceRecord, MarketError> {
        let record = self
            .devices
            .get_mut(device_id)
            .ok_or_else(|| MarketError::NotRegistered {
                device_id: device_id.clone(),
            })?;
        if &record.owner != caller {
            return Err(MarketError::NotOwner {
                device_id: device_id.clone(),
                caller: caller.clone(),
            });
        }
        Ok(record)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The record for a device, if registered.
    pub fn get(&self, device_id: &DeviceId) -> Option<&DeviceRecord> {
        self.devices.get(device_id)
    }

    /// Whether a device identifier has a record.
    pub fn exists(&self, device_id: &DeviceId) -> bool {
        self.devices.contains_key(device_id)
    }

    /// Every device ever registered, in registration order.
    ///
    /// This list grows without bound over the registry's lifetime;
    /// paginating callers must account for that.
    pub fn all_devices(&self) -> &[DeviceId] {
        &self.all_devices
    }

    /// The devices registered by `owner`, in registration order.
    pub fn devices_by_owner(&self, owner: &AccountId) -> &[DeviceId] {
        self.devices_by_owner
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
