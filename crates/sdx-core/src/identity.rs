//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the SDX Stack.
//! These prevent accidental identifier confusion — you cannot pass an
//! `AccountId` where a `DeviceId` is expected.
//!
//! ## Security Invariant
//!
//! Both constructors validate their input. The registry and ledger operate
//! only on identifiers that have already passed validation, so malformed
//! device serials and account addresses cannot enter persistent state.
//!
//! Identity itself is supplied pre-authenticated by the embedding layer
//! (wallet/signing); this crate only enforces well-formedness.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum byte length of a device identifier.
pub const MAX_DEVICE_ID_LEN: usize = 64;

/// Maximum byte length of an account identifier.
pub const MAX_ACCOUNT_ID_LEN: usize = 128;

/// Unique identifier for a registered IoT device (e.g., a serial number).
///
/// Constrained to non-empty ASCII alphanumerics plus `-`, `_`, `.`, `:`,
/// at most [`MAX_DEVICE_ID_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Validate and construct a device identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if the input is empty,
    /// longer than [`MAX_DEVICE_ID_LEN`] bytes, or contains a character
    /// outside ASCII alphanumerics and `-`, `_`, `.`, `:`.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(invalid("device", &id, "must not be empty"));
        }
        if id.len() > MAX_DEVICE_ID_LEN {
            return Err(invalid(
                "device",
                &id,
                format!("must be at most {MAX_DEVICE_ID_LEN} bytes"),
            ));
        }
        if let Some(c) = id
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(invalid(
                "device",
                &id,
                format!("character {c:?} is not allowed"),
            ));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An account address as supplied by the caller identity layer.
///
/// The wallet/signing layer authenticates the principal; this type only
/// enforces well-formedness: non-empty, at most [`MAX_ACCOUNT_ID_LEN`]
/// bytes, no whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an account identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if the input is empty,
    /// longer than [`MAX_ACCOUNT_ID_LEN`] bytes, or contains whitespace
    /// or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(invalid("account", &id, "must not be empty"));
        }
        if id.len() > MAX_ACCOUNT_ID_LEN {
            return Err(invalid(
                "account",
                &id,
                format!("must be at most {MAX_ACCOUNT_ID_LEN} bytes"),
            ));
        }
        if let Some(c) = id.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid(
                "account",
                &id,
                format!("character {c:?} is not allowed"),
            ));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(kind: &'static str, value: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidIdentifier {
        kind,
        value: value.to_string(),
        reason: reason.into(),
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
