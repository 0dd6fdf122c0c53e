//! Structured results of one scan cycle and their text rendering.
use std::io;

/// Maximum number of devices collected per cycle.
///
/// This is an explicit resource bound: addresses that acknowledge after
/// the list is full are silently dropped, though the sweep still probes
/// the whole address space.
pub const MAX_DEVICES: usize = 32;

/// Identification registers probed for each discovered device, in probe
/// order.
///
/// These offsets are common chip-identification registers across several
/// sensor families (`0xD0` is the Bosch chip-id register, `0x00` and
/// `0x0F` are who-am-i offsets elsewhere). The values read are reported
/// raw; no attempt is made to decode them into a device name.
pub const ID_REGISTERS: [u8; 3] = [0xD0, 0x00, 0x0F];

/// Outcome of a single register probe.
///
/// A failed read is a distinct variant rather than a reserved byte value,
/// so a register that legitimately holds `0xFF` is never mistaken for a
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeValue {
    /// The register was read successfully.
    Value(u8),
    /// The pointer write was not acknowledged or the read did not return
    /// exactly one byte within the timeout.
    Failed,
}

/// Ordered, fixed-capacity list of addresses that acknowledged during the
/// presence sweep.
///
/// Insertion order is ascending address order, because the sweep proceeds
/// low to high and each address is probed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundAddresses {
    addresses: [u8; MAX_DEVICES],
    count: usize,
}

impl FoundAddresses {
    pub(crate) fn new() -> Self {
        Self {
            addresses: [0; MAX_DEVICES],
            count: 0,
        }
    }

    /// Append an address, silently dropping it once capacity is reached.
    pub(crate) fn push(&mut self, address: u8) {
        if self.count < MAX_DEVICES {
            self.addresses[self.count] = address;
            self.count += 1;
        }
    }

    /// Number of addresses collected.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the sweep found nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The collected addresses in ascending order.
    pub fn as_slice(&self) -> &[u8] {
        &self.addresses[..self.count]
    }

    /// Iterate over the collected addresses.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for FoundAddresses {
    fn default() -> Self {
        Self::new()
    }
}

/// Identification probes for one discovered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdReport {
    /// The device's 7-bit address.
    pub address: u8,
    /// The three probes of [`ID_REGISTERS`], in that fixed order.
    pub probes: [(u8, ProbeValue); ID_REGISTERS.len()],
}

/// Everything one scan cycle produced.
///
/// Built fresh each cycle and never persisted; there is no device
/// registry across cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Addresses that acknowledged the presence sweep.
    pub found: FoundAddresses,
    /// Per-device identification results, in the same order as `found`.
    ///
    /// Empty when identification probing is disabled or nothing was
    /// found.
    pub identification: Vec<DeviceIdReport>,
}

impl ScanReport {
    /// Render the whole report as the same text the scanner emits while
    /// running a cycle.
    pub fn write_text<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write_presence_line(sink, &self.found)?;
        if self.found.is_empty() {
            return writeln!(sink);
        }
        for device in &self.identification {
            write_id_block(sink, device)?;
        }
        writeln!(sink)
    }
}

/// `I2C addresses found (2): 0x23, 0x76` — or `(0): none`.
pub(crate) fn write_presence_line<W: io::Write>(
    sink: &mut W,
    found: &FoundAddresses,
) -> io::Result<()> {
    write!(sink, "I2C addresses found ({}): ", found.len())?;
    if found.is_empty() {
        return writeln!(sink, "none");
    }
    for (position, address) in found.iter().enumerate() {
        if position > 0 {
            write!(sink, ", ")?;
        }
        write!(sink, "0x{address:02X}")?;
    }
    writeln!(sink)
}

/// Per-device block: a header line and one line per probed register.
pub(crate) fn write_id_block<W: io::Write>(sink: &mut W, device: &DeviceIdReport) -> io::Result<()> {
    writeln!(sink, "Device 0x{:02X} ID probe:", device.address)?;
    for (register, value) in device.probes {
        match value {
            ProbeValue::Value(byte) => {
                writeln!(sink, "  reg 0x{register:02X} = 0x{byte:02X}")?;
            }
            ProbeValue::Failed => writeln!(sink, "  reg 0x{register:02X} = read failed")?,
        }
    }
    Ok(())
}
