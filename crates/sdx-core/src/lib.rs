//! # sdx-core — Foundational Types for the SDX Stack
//!
//! This crate is the bedrock of the Sensor Data Exchange. It defines the
//! domain primitives shared by every other crate in the workspace; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `DeviceId` and `AccountId`
//!    are validated newtypes — no bare strings for identifiers. A malformed
//!    device serial or account address is rejected at construction, so the
//!    registry and ledger never see one.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Subscription expiry arithmetic goes
//!    through `checked_add_secs` — overflow is an error, never a wrap.
//!
//! 3. **Integer amounts.** `Amount` wraps a `u128` in the smallest payment
//!    unit. There are no floats anywhere in the payment path, and addition
//!    is checked.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdx-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod amount;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Amount;
pub use error::CoreError;
pub use identity::{AccountId, DeviceId};
pub use temporal::Timestamp;
