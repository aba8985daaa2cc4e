//! # sdx CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// SDX Stack CLI — Sensor Data Exchange toolchain.
///
/// Registers devices, manages listings, purchases access periods, and
/// queries the marketplace snapshot.
#[derive(Parser, Debug)]
#[command(name = "sdx", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Register a new device.
    Register(sdx_cli::device::RegisterArgs),
    /// Overwrite a device's listing terms.
    Update(sdx_cli::device::UpdateArgs),
    /// Toggle a device's discoverability flag.
    SetActive(sdx_cli::device::SetActiveArgs),
    /// Purchase one access period for a device.
    Purchase(sdx_cli::purchase::PurchaseArgs),
    /// Show one device record.
    Device(sdx_cli::query::DeviceArgs),
    /// List device identifiers.
    Devices(sdx_cli::query::DevicesArgs),
    /// Show a subscriber's access grant for a device.
    Access(sdx_cli::query::AccessArgs),
    /// Dump the market event log.
    Events(sdx_cli::query::EventsArgs),
    /// Show an account's settlement balance.
    Balance(sdx_cli::query::BalanceArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Register(args) => sdx_cli::device::register(args),
        Commands::Update(args) => sdx_cli::device::update(args),
        Commands::SetActive(args) => sdx_cli::device::set_active(args),
        Commands::Purchase(args) => sdx_cli::purchase::purchase(args),
        Commands::Device(args) => sdx_cli::query::device(args),
        Commands::Devices(args) => sdx_cli::query::devices(args),
        Commands::Access(args) => sdx_cli::query::access(args),
        Commands::Events(args) => sdx_cli::query::events(args),
        Commands::Balance(args) => sdx_cli::query::balance(args),
    }
}
