//! # Query Subcommands
//!
//! Read-only views over the snapshot: device records, listings, access
//! grants, the event log, and settlement balances. Queries never write
//! the state file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use sdx_core::DeviceId;

use crate::state::{parse_account, parse_device, CliState};

/// Arguments for `sdx device`.
#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Device identifier.
    #[arg(long)]
    pub device: String,
}

/// Arguments for `sdx devices`.
#[derive(Args, Debug)]
pub struct DevicesArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Restrict the listing to one owner's devices.
    #[arg(long)]
    pub owner: Option<String>,
    /// Only list devices currently flagged active.
    #[arg(long)]
    pub active_only: bool,
}

/// Arguments for `sdx access`.
#[derive(Args, Debug)]
pub struct AccessArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Subscriber account.
    #[arg(long)]
    pub subscriber: String,
    /// Device identifier.
    #[arg(long)]
    pub device: String,
}

/// Arguments for `sdx events`.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Emit only records with sequence number at or above this.
    #[arg(long, default_value_t = 0)]
    pub since: u64,
}

/// Arguments for `sdx balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Account to report the settlement balance of.
    #[arg(long)]
    pub account: String,
}

/// Handle `sdx device`: print the full record as JSON.
pub fn device(args: DeviceArgs) -> anyhow::Result<()> {
    let device = parse_device(&args.device)?;
    let state = CliState::load(&args.state)?;
    let record = state
        .marketplace
        .device(&device)
        .with_context(|| format!("device {device} is not registered"))?;
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Handle `sdx devices`: print identifiers in registration order.
pub fn devices(args: DevicesArgs) -> anyhow::Result<()> {
    let state = CliState::load(&args.state)?;
    let ids: Vec<&DeviceId> = match &args.owner {
        Some(owner) => {
            let owner = parse_account(owner)?;
            state.marketplace.devices_by_owner(&owner).iter().collect()
        }
        None => state.marketplace.all_devices().iter().collect(),
    };
    for id in ids {
        let active = state
            .marketplace
            .device(id)
            .map(|r| r.is_active)
            .unwrap_or(false);
        if args.active_only && !active {
            continue;
        }
        println!("{id}\t{}", if active { "active" } else { "inactive" });
    }
    Ok(())
}

/// Handle `sdx access`: print expiry and cumulative spend for a pair.
///
/// Absent entries report an expiry of `0` and a spend of `0`, matching
/// the marketplace's "no entry" signal.
pub fn access(args: AccessArgs) -> anyhow::Result<()> {
    let subscriber = parse_account(&args.subscriber)?;
    let device = parse_device(&args.device)?;
    let state = CliState::load(&args.state)?;

    match state.marketplace.access_expiry(&subscriber, &device) {
        Some(expiry) => println!("expiry: {expiry} (epoch {})", expiry.epoch_secs()),
        None => println!("expiry: 0 (no access entry)"),
    }
    println!(
        "total paid: {}",
        state.marketplace.total_paid(&subscriber, &device)
    );
    Ok(())
}

/// Handle `sdx events`: print the event log as JSON lines.
pub fn events(args: EventsArgs) -> anyhow::Result<()> {
    let state = CliState::load(&args.state)?;
    for record in state.marketplace.events() {
        if record.seq < args.since {
            continue;
        }
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

/// Handle `sdx balance`: print an account's settlement balance.
pub fn balance(args: BalanceArgs) -> anyhow::Result<()> {
    let account = parse_account(&args.account)?;
    let state = CliState::load(&args.state)?;
    println!("{}", state.settlement.balance_of(&account));
    Ok(())
}
