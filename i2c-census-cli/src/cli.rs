use crate::util::{self, DeviceSpec};

use clap::Parser;

/// CLI for the i2c-census bus discovery and identification scanner
///
/// Scan cycles run against a simulated two-wire bus populated from the
/// command line, which makes the tool useful for trying out the scanner's
/// behaviour (truncation at 32 devices, failed identification probes,
/// periodic cycles) without any hardware attached.
///
/// Devices are attached with --device, either as a bare hex address
/// (identification registers read as 0x00) or with register contents:
///
///   i2c-census-cli scan --device 0x23 --device 0x76=D0:60,00:89
///
/// A device attached with --mute-device acknowledges presence probes but
/// never answers reads, which is how a wedged or write-only device shows
/// up on a real bus.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// Run a single scan cycle.
    Scan(ScanArgs),
    /// Run scan cycles periodically.
    Watch(WatchArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct ScanArgs {
    /// Attach a device: ADDR or ADDR=REG:VAL,... (all hex)
    #[arg(short, long = "device", value_parser = util::device_spec)]
    pub(crate) devices: Vec<DeviceSpec>,
    /// Attach a device that acknowledges but never answers reads
    #[arg(long = "mute-device", value_parser = util::address_from_hex)]
    pub(crate) mute_devices: Vec<u8>,
    /// Per-transaction response timeout in milliseconds
    #[arg(long, default_value_t = 50)]
    pub(crate) timeout_ms: u64,
    /// Skip the identification phase
    #[arg(long)]
    pub(crate) no_probe: bool,
}

#[derive(Debug, clap::Args)]
pub(crate) struct WatchArgs {
    #[command(flatten)]
    pub(crate) scan: ScanArgs,
    /// Spacing between cycles in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub(crate) interval_ms: u64,
    /// Number of cycles to run, 0 to run until interrupted
    #[arg(long, default_value_t = 0)]
    pub(crate) cycles: u32,
}
