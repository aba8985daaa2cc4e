//! # Error Types — Market Error Taxonomy
//!
//! One structured error enum covers every way a market operation can fail:
//! authorization (`NotOwner`), state (`AlreadyRegistered`, `NotRegistered`),
//! payment (`InsufficientPayment`, `ForwardingFailed`), and the arithmetic
//! guards (`AmountOverflow`, `ExpiryOverflow`).
//!
//! Every error is a full-operation abort with zero partial state change.
//! There is no local recovery or internal retry; the embedding layer
//! surfaces the message and permits a fresh attempt.

use thiserror::Error;

use sdx_core::{AccountId, Amount, DeviceId};

use crate::settlement::SettlementError;

/// Errors produced by registry and access-ledger operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// The device identifier already has a record; registration is
    /// exactly-once for the lifetime of the registry.
    #[error("device {device_id} is already registered")]
    AlreadyRegistered {
        /// The identifier that was re-registered.
        device_id: DeviceId,
    },

    /// No record exists for the device identifier.
    #[error("device {device_id} is not registered")]
    NotRegistered {
        /// The unknown identifier.
        device_id: DeviceId,
    },

    /// The caller is not the device's recorded owner.
    #[error("account {caller} is not the owner of device {device_id}")]
    NotOwner {
        /// The device whose mutation was attempted.
        device_id: DeviceId,
        /// The rejected caller.
        caller: AccountId,
    },

    /// The attached payment does not satisfy the device's price under the
    /// configured payment policy.
    #[error("payment of {offered} does not satisfy price {required} for device {device_id}")]
    InsufficientPayment {
        /// The device being purchased.
        device_id: DeviceId,
        /// The price per access period.
        required: Amount,
        /// The payment that was attached.
        offered: Amount,
    },

    /// Forwarding the payment to the device owner failed; the ledger write
    /// was rolled back and no state changed.
    #[error("forwarding {amount} to owner {owner} failed")]
    ForwardingFailed {
        /// The owner the transfer was destined for.
        owner: AccountId,
        /// The amount that could not be forwarded.
        amount: Amount,
        /// The underlying settlement failure.
        #[source]
        source: SettlementError,
    },

    /// Accepting the payment would overflow the cumulative `total_paid`
    /// counter for this (subscriber, device) pair.
    #[error("cumulative spend for device {device_id} would overflow")]
    AmountOverflow {
        /// The device whose ledger row would overflow.
        device_id: DeviceId,
    },

    /// Extending the subscription would push the expiry past the
    /// representable time range.
    #[error("subscription expiry for device {device_id} is out of range")]
    ExpiryOverflow {
        /// The device whose expiry could not be extended.
        device_id: DeviceId,
    },
}
