//! # Registration Subcommands
//!
//! `register`, `update`, and `set-active`: the owner-side mutations of the
//! device registry.

use std::path::PathBuf;

use clap::Args;

use sdx_market::DeviceSpec;

use crate::state::{parse_account, parse_amount, parse_device, resolve_now, CliState};

/// Arguments for `sdx register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Acting account; becomes the device owner.
    #[arg(long)]
    pub caller: String,
    /// Device identifier (e.g., a serial number).
    #[arg(long)]
    pub device: String,
    /// Human-readable device name.
    #[arg(long)]
    pub name: String,
    /// Free-form classification string.
    #[arg(long)]
    pub device_type: String,
    /// Free-form location description.
    #[arg(long)]
    pub location: String,
    /// Price of one access period, in the smallest payment unit.
    #[arg(long)]
    pub price: u128,
    /// Length of one access period, in seconds.
    #[arg(long)]
    pub period_secs: u64,
    /// Opaque pointer to off-market metadata.
    #[arg(long)]
    pub metadata_uri: String,
    /// Transaction time as Unix epoch seconds (defaults to wall clock).
    #[arg(long)]
    pub now: Option<i64>,
}

/// Arguments for `sdx update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Acting account; must be the device owner.
    #[arg(long)]
    pub caller: String,
    /// Device identifier.
    #[arg(long)]
    pub device: String,
    /// Human-readable device name.
    #[arg(long)]
    pub name: String,
    /// Free-form classification string.
    #[arg(long)]
    pub device_type: String,
    /// Free-form location description.
    #[arg(long)]
    pub location: String,
    /// Price of one access period, in the smallest payment unit.
    #[arg(long)]
    pub price: u128,
    /// Length of one access period, in seconds.
    #[arg(long)]
    pub period_secs: u64,
    /// Opaque pointer to off-market metadata.
    #[arg(long)]
    pub metadata_uri: String,
}

/// Arguments for `sdx set-active`.
#[derive(Args, Debug)]
pub struct SetActiveArgs {
    /// Path to the marketplace snapshot file.
    #[arg(long, default_value = "sdx-state.json")]
    pub state: PathBuf,
    /// Acting account; must be the device owner.
    #[arg(long)]
    pub caller: String,
    /// Device identifier.
    #[arg(long)]
    pub device: String,
    /// New discoverability flag (`true` or `false`).
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: bool,
}

fn spec_from(
    name: String,
    device_type: String,
    location: String,
    price: u128,
    period_secs: u64,
    metadata_uri: String,
) -> DeviceSpec {
    DeviceSpec {
        name,
        device_type,
        location,
        price_per_period: parse_amount(price),
        subscription_period_secs: period_secs,
        metadata_uri,
    }
}

/// Handle `sdx register`.
pub fn register(args: RegisterArgs) -> anyhow::Result<()> {
    let caller = parse_account(&args.caller)?;
    let device = parse_device(&args.device)?;
    let now = resolve_now(args.now)?;
    let spec = spec_from(
        args.name,
        args.device_type,
        args.location,
        args.price,
        args.period_secs,
        args.metadata_uri,
    );

    let mut state = CliState::load(&args.state)?;
    state
        .marketplace
        .register(&caller, device.clone(), spec, now)?;
    state.save(&args.state)?;

    tracing::info!(device = %device, owner = %caller, "device registered");
    println!("registered {device} (owner {caller})");
    Ok(())
}

/// Handle `sdx update`.
pub fn update(args: UpdateArgs) -> anyhow::Result<()> {
    let caller = parse_account(&args.caller)?;
    let device = parse_device(&args.device)?;
    let spec = spec_from(
        args.name,
        args.device_type,
        args.location,
        args.price,
        args.period_secs,
        args.metadata_uri,
    );

    let mut state = CliState::load(&args.state)?;
    state.marketplace.update(&caller, &device, spec)?;
    state.save(&args.state)?;

    tracing::info!(device = %device, "listing updated");
    println!("updated {device}");
    Ok(())
}

/// Handle `sdx set-active`.
pub fn set_active(args: SetActiveArgs) -> anyhow::Result<()> {
    let caller = parse_account(&args.caller)?;
    let device = parse_device(&args.device)?;

    let mut state = CliState::load(&args.state)?;
    state
        .marketplace
        .set_active(&caller, &device, args.active)?;
    state.save(&args.state)?;

    tracing::info!(device = %device, active = args.active, "discoverability toggled");
    println!(
        "{device} is now {}",
        if args.active { "active" } else { "inactive" }
    );
    Ok(())
}
