//! # Error Types — Core Error Hierarchy
//!
//! Defines the errors produced by the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Identifier and timestamp construction fail loudly with the offending
//! input and the rule it violated; there is no silent normalization.

use thiserror::Error;

/// Errors produced by the foundational types in this crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An identifier failed validation at construction.
    #[error("invalid {kind} identifier {value:?}: {reason}")]
    InvalidIdentifier {
        /// Identifier namespace ("device" or "account").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// The rule the input violated.
        reason: String,
    },

    /// A timestamp string or epoch value could not be interpreted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
