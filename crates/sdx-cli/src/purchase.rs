//! # Purchase Subcommand
//!
//! `purchase`: buy one access period for a device. The payment is
//! forwarded to the device owner's settlement balance inside the same
//! operation; a failed purchase leaves the snapshot untouched.

use std::path::PathBuf;

use clap::Args;

use crate::state::{parse_account, parse_amount, parse_device, resolve_now, CliState};

/// Arguments for `sdx purchase`.
#[derive(Args, Debug)]
pub struct PurchaseArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Acting account; becomes (or already is) the subscriber.
    #[arg(long)]
    pub caller: String,
    /// Device identifier.
    #[arg(long)]
    pub device: String,
    /// Attached payment, in the smallest payment unit.
    #[arg(long)]
    pub payment: u128,
    /// Transaction time as Unix epoch seconds (defaults to wall clock).
    #[arg(long)]
    pub now: Option<i64>,
}

/// Handle `sdx purchase`.
pub fn purchase(args: PurchaseArgs) -> anyhow::Result<()> {
    let caller = parse_account(&args.caller)?;
    let device = parse_device(&args.device)?;
    let payment = parse_amount(args.payment);
    let now = resolve_now(args.now)?;

    let mut state = CliState::load(&args.state)?;
    let new_expiry = {
        let CliState {
            marketplace,
            settlement,
        } = &mut state;
        marketplace.purchase_access(&caller, &device, payment, now, settlement)?
    };
    state.save(&args.state)?;

    tracing::info!(
        device = %device,
        subscriber = %caller,
        amount = %payment,
        expiry = %new_expiry,
        "access purchased"
    );
    println!(
        "access to {device} granted until {new_expiry} (epoch {})",
        new_expiry.epoch_secs()
    );
    Ok(())
}
