//! The discovery and identification engine.
use std::io;
use std::time::Duration;

use crate::guard::BoundedBus;
use crate::report::{DeviceIdReport, FoundAddresses, ID_REGISTERS, ProbeValue, ScanReport};
use crate::transport::BusTransport;

/// Lowest address probed by the presence sweep.
///
/// Address 0 is the general-call address and is never probed.
pub const FIRST_SCAN_ADDRESS: u8 = 0x01;

/// Highest address probed by the presence sweep.
///
/// Values of 127 and above are reserved on the bus.
pub const LAST_SCAN_ADDRESS: u8 = 0x7E;

/// Default per-transaction response timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(50);

/// Conventional spacing between scan cycles.
///
/// Cycle spacing is owned by the caller, not the engine; this constant
/// only exists so callers agree on a default.
pub const DEFAULT_CYCLE_DELAY: Duration = Duration::from_millis(5000);

/// Configuration for one scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Whether to run the identification phase for discovered devices.
    pub probe_ids: bool,
    /// Per-transaction response timeout, configured on the bus guard at
    /// the start of every cycle. Zero disables the safety margin.
    pub timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_ids: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The two-phase scan engine.
///
/// A cycle is stateless: [`run_cycle`](Scanner::run_cycle) builds its
/// result from scratch every time, and nothing is carried over between
/// invocations. The caller decides when cycles run and how far apart.
///
/// Nothing a device does can abort a cycle. Absent addresses and failed
/// probes are captured as data in the [`ScanReport`]; the only fallible
/// path is writing to the output sink.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// A scanner with the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run one full scan cycle, emitting text to `sink` as each phase
    /// completes.
    ///
    /// Phase 1 probes every address from 1 to 126 in ascending order,
    /// exactly once each, so output is deterministic across runs. At most
    /// [`MAX_DEVICES`](crate::report::MAX_DEVICES) acknowledging
    /// addresses are collected; the sweep still visits the rest.
    ///
    /// Phase 2, when enabled and at least one device was found, reads the
    /// three [`ID_REGISTERS`] from each discovered device in the same
    /// order. One device's failure never blocks identification of the
    /// others.
    pub fn run_cycle<T, W>(&self, bus: &mut BoundedBus<T>, sink: &mut W) -> io::Result<ScanReport>
    where
        T: BusTransport,
        W: io::Write,
    {
        bus.configure_timeout(self.config.timeout);

        let mut found = FoundAddresses::new();
        for address in FIRST_SCAN_ADDRESS..=LAST_SCAN_ADDRESS {
            if bus.probe_address(address) {
                found.push(address);
            }
        }
        crate::report::write_presence_line(sink, &found)?;

        let mut report = ScanReport {
            found,
            identification: Vec::new(),
        };
        if found.is_empty() {
            writeln!(sink)?;
            return Ok(report);
        }

        if self.config.probe_ids {
            for address in found.iter() {
                let device = identify_device(bus, address);
                crate::report::write_id_block(sink, &device)?;
                report.identification.push(device);
            }
        }
        writeln!(sink)?;
        Ok(report)
    }
}

/// Probe the fixed identification registers of one device.
///
/// A failed probe records [`ProbeValue::Failed`] and the remaining
/// registers are still read.
fn identify_device<T: BusTransport>(bus: &mut BoundedBus<T>, address: u8) -> DeviceIdReport {
    let probes = ID_REGISTERS.map(|register| {
        let value = match bus.read_register(address, register) {
            Ok(byte) => ProbeValue::Value(byte),
            Err(_) => ProbeValue::Failed,
        };
        (register, value)
    });
    DeviceIdReport { address, probes }
}
