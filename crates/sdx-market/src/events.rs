//! # Market Events
//!
//! Append-only log of committed mutations. The market provides no push
//! mechanism; pull-based consumers (marketplace listings, dashboards)
//! read this log and the query interface to build their own views.
//!
//! Records carry a gapless, monotonically increasing sequence number and
//! the transaction timestamp. Only committed operations append: a
//! rolled-back purchase leaves no record.

use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, Amount, DeviceId, Timestamp};

/// An event emitted by a committed market mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A device was registered. Carries the full listing.
    DeviceRegistered {
        /// The new device's identifier.
        device_id: DeviceId,
        /// The registering owner.
        owner: AccountId,
        /// Human-readable device name.
        name: String,
        /// Free-form classification string.
        device_type: String,
        /// Free-form location description.
        location: String,
        /// Price of one access period.
        price_per_period: Amount,
        /// Length of one access period, in seconds.
        subscription_period_secs: u64,
        /// Opaque pointer to off-market metadata.
        metadata_uri: String,
    },

    /// A subscriber purchased (or renewed) access to a device.
    DeviceAccessPurchased {
        /// The purchasing subscriber.
        subscriber: AccountId,
        /// The device purchased.
        device_id: DeviceId,
        /// The payment that was accepted and forwarded.
        amount_paid: Amount,
        /// The expiry after this purchase.
        new_expiry: Timestamp,
    },
}

impl MarketEvent {
    /// The canonical event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeviceRegistered { .. } => "DEVICE_REGISTERED",
            Self::DeviceAccessPurchased { .. } => "DEVICE_ACCESS_PURCHASED",
        }
    }

    /// The device this event concerns.
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::DeviceRegistered { device_id, .. } => device_id,
            Self::DeviceAccessPurchased { device_id, .. } => device_id,
        }
    }
}

/// One entry in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Gapless, monotonically increasing sequence number (from 0).
    pub seq: u64,
    /// Transaction timestamp of the emitting operation.
    pub timestamp: Timestamp,
    /// The event payload.
    pub event: MarketEvent,
}

/// The append-only market event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning the next sequence number.
    pub fn append(&mut self, timestamp: Timestamp, event: MarketEvent) -> &EventRecord {
        let seq = self.records.len() as u64;
        self.records.push(EventRecord {
            seq,
            timestamp,
            event,
        });
        // Just pushed, so the log is non-empty.
        &self.records[self.records.len() - 1]
    }

    /// All records, in emission order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
