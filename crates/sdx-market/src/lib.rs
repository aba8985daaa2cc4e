//! # sdx-market — Device Registry & Access Subscription Ledger
//!
//! The core subsystem of the Sensor Data Exchange: records IoT device
//! ownership and listing terms, and mediates pay-per-period access grants
//! between data consumers and device owners.
//!
//! ## Components
//!
//! - **Registry** (`registry.rs`): persistent device records plus two
//!   append-only indices (all devices, devices by owner). Enforces
//!   single-registration and owner-only mutation.
//!
//! - **Access ledger** (`access.rs`): per (subscriber, device) rows tracking
//!   subscription expiry and cumulative spend. Rows are created on first
//!   purchase and never deleted; both fields are monotonically
//!   non-decreasing.
//!
//! - **Settlement** (`settlement.rs`): the payment-forwarding seam. Funds
//!   move to the device owner synchronously inside the purchase operation;
//!   there is no escrow held by the market.
//!
//! - **Events** (`events.rs`): append-only, gapless log of committed
//!   mutations for pull-based consumers.
//!
//! - **Marketplace** (`market.rs`): the single-writer facade tying the
//!   pieces together. `purchase_access` applies the check-effects-
//!   interactions discipline: validate, write the ledger, then forward
//!   funds last — rolling the ledger back if forwarding fails.
//!
//! ## Concurrency Model
//!
//! All state is owned by one [`Marketplace`] value; `&mut self` entry
//! points give single-writer, strictly-ordered execution by construction.
//! A mutating call either returns `Ok` having fully committed or returns
//! `Err` having left state exactly as it was.
//!
//! ## Crate Policy
//!
//! - Depends on `sdx-core` internally, nothing else.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All persistent types derive `Serialize`/`Deserialize`.

pub mod access;
pub mod device;
pub mod error;
pub mod events;
pub mod market;
pub mod registry;
pub mod settlement;

// Re-export primary types for ergonomic imports.
pub use access::{AccessEntry, AccessLedger};
pub use device::{DeviceRecord, DeviceSpec};
pub use error::MarketError;
pub use events::{EventLog, EventRecord, MarketEvent};
pub use market::{Marketplace, PaymentPolicy};
pub use registry::DeviceRegistry;
pub use settlement::{InMemorySettlement, Settlement, SettlementError};
