//! # Snapshot State
//!
//! The CLI's persistence layer: one JSON file holding the marketplace and
//! the in-memory settlement book. Mutating subcommands load the file,
//! apply a single operation, and save it back; queries only load.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use sdx_core::{AccountId, Amount, DeviceId, Timestamp};
use sdx_market::{InMemorySettlement, Marketplace};

/// Everything the CLI persists between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliState {
    /// The device registry, access ledger, and event log.
    pub marketplace: Marketplace,
    /// The settlement balance book owners are credited into.
    pub settlement: InMemorySettlement,
}

impl CliState {
    /// Load a snapshot, or start empty if the file does not exist yet.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Save the snapshot as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self).context("serializing snapshot")?;
        std::fs::write(path, raw)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        tracing::debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }
}

// ── Shared argument parsing ──────────────────────────────────────────

/// Parse an account identifier argument.
pub fn parse_account(s: &str) -> anyhow::Result<AccountId> {
    Ok(AccountId::new(s)?)
}

/// Parse a device identifier argument.
pub fn parse_device(s: &str) -> anyhow::Result<DeviceId> {
    Ok(DeviceId::new(s)?)
}

/// Parse a raw unit count into an amount.
pub fn parse_amount(units: u128) -> Amount {
    Amount::new(units)
}

/// Resolve the transaction time: an explicit epoch override, or the wall
/// clock.
pub fn resolve_now(now: Option<i64>) -> anyhow::Result<Timestamp> {
    match now {
        Some(secs) => Ok(Timestamp::from_epoch_secs(secs)?),
        None => Ok(Timestamp::now()),
    }
}
