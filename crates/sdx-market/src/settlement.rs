//! # Settlement — Payment Forwarding Seam
//!
//! A subscriber's payment moves to the device owner synchronously inside
//! the purchase operation; the market holds no escrow. The [`Settlement`]
//! trait is the seam to the real payment substrate; [`InMemorySettlement`]
//! is a deterministic balance book for embedding and tests.
//!
//! Forwarding is the final step of a purchase. A failure here must abort
//! the whole operation, so the trait's error type is carried inside
//! [`MarketError::ForwardingFailed`](crate::error::MarketError) after the
//! caller rolls the ledger back.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sdx_core::{AccountId, Amount};

/// Errors from the settlement substrate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The recipient cannot accept the transfer.
    #[error("transfer to {account} rejected: {reason}")]
    TransferRejected {
        /// The recipient that rejected the transfer.
        account: AccountId,
        /// Substrate-supplied reason.
        reason: String,
    },

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow crediting {account}")]
    BalanceOverflow {
        /// The recipient whose balance would overflow.
        account: AccountId,
    },
}

/// The payment-forwarding seam.
///
/// Implementations transfer `amount` to `to` synchronously and report
/// failure without partial effect: after an `Err`, the recipient has not
/// been credited.
pub trait Settlement {
    /// Forward `amount` to `to`.
    fn forward(&mut self, to: &AccountId, amount: Amount) -> Result<(), SettlementError>;
}

/// A deterministic in-memory balance book.
///
/// Credits accumulate per account. Individual accounts can be configured
/// to reject incoming transfers, which is how the purchase rollback path
/// is exercised in tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySettlement {
    /// Accumulated credits per account.
    balances: BTreeMap<AccountId, Amount>,
    /// Accounts configured to reject incoming transfers.
    rejecting: BTreeSet<AccountId>,
}

impl InMemorySettlement {
    /// Create an empty balance book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated balance of an account; zero if never credited.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// Configure whether an account rejects incoming transfers.
    pub fn set_rejecting(&mut self, account: AccountId, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }
}

impl Settlement for InMemorySettlement {
    fn forward(&mut self, to: &AccountId, amount: Amount) -> Result<(), SettlementError> {
        if self.rejecting.contains(to) {
            return Err(SettlementError::TransferRejected {
                account: to.clone(),
                reason: "recipient rejects incoming transfers".to_string(),
            });
        }
        let current = self.balance_of(to);
        let credited = current
            .checked_add(amount)
            .ok_or_else(|| SettlementError::BalanceOverflow { account: to.clone() })?;
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}
