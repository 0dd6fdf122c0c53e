//! Deterministic in-memory bus for tests and hardware-free development.
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use super::{BusStatus, BusTransport};

/// One simulated target device.
#[derive(Debug, Clone, Default)]
struct SimDevice {
    registers: BTreeMap<u8, u8>,
    /// When false the device acknowledges its address but never returns
    /// read data, as a wedged or write-only device would.
    readable: bool,
}

/// A simulated two-wire bus with a fixed set of target devices.
///
/// The simulation is deliberately small: devices acknowledge address-only
/// probes, remember the last register-pointer byte written to them, and
/// serve register reads from an in-memory map (unpopulated registers read
/// as `0x00`). It never blocks, so the configured response timeout only
/// records what a real transport would enforce.
///
/// Behaviour is a pure function of the device set, so repeated scans over
/// an unchanged bus produce identical results.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBus {
    devices: BTreeMap<u8, SimDevice>,
    timeout: Duration,
    tx_address: u8,
    tx_buffer: Vec<u8>,
    rx_queue: VecDeque<u8>,
}

impl SimulatedBus {
    /// An empty bus with no devices attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a device that acknowledges its address and reads `0x00`
    /// from every register.
    pub fn add_device(&mut self, address: u8) {
        self.devices.insert(
            address,
            SimDevice {
                readable: true,
                ..SimDevice::default()
            },
        );
    }

    /// Attach a device with the given register contents.
    pub fn add_device_with_registers(&mut self, address: u8, registers: &[(u8, u8)]) {
        self.devices.insert(
            address,
            SimDevice {
                registers: registers.iter().copied().collect(),
                readable: true,
            },
        );
    }

    /// Attach a device that acknowledges presence probes but never
    /// returns read data.
    ///
    /// Every register read against it plays out as a response timeout.
    pub fn add_unresponsive_device(&mut self, address: u8) {
        self.devices.insert(address, SimDevice::default());
    }

    /// The most recently configured response timeout.
    pub fn response_timeout(&self) -> Duration {
        self.timeout
    }

    /// Register pointer last written to the device at `address`.
    fn selected_register(&self, address: u8) -> u8 {
        // The register-pointer write is the single byte queued before
        // end_transmission(false).
        match self.tx_buffer.as_slice() {
            [register, ..] if self.tx_address == address => *register,
            _ => 0x00,
        }
    }
}

impl BusTransport for SimulatedBus {
    fn set_response_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn begin_transmission(&mut self, address: u8) {
        self.tx_address = address;
        self.tx_buffer.clear();
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx_buffer.push(byte);
    }

    fn end_transmission(&mut self, send_stop: bool) -> BusStatus {
        let _ = send_stop;
        match self.devices.get(&self.tx_address) {
            Some(_) => BusStatus::Success,
            None => BusStatus::AddressNack,
        }
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let first = self.selected_register(address);
        let Some(device) = self.devices.get(&address) else {
            return 0;
        };
        if !device.readable {
            return 0;
        }
        for offset in 0..count {
            let register = first.wrapping_add(offset as u8);
            let value = device.registers.get(&register).copied().unwrap_or(0x00);
            self.rx_queue.push_back(value);
        }
        count
    }

    fn read_byte(&mut self) -> u8 {
        self.rx_queue.pop_front().unwrap_or(0)
    }
}
