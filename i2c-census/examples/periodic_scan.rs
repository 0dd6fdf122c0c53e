//! # Periodic scan example
//!
//! Runs repeated scan cycles against the simulated bus, spaced by the
//! conventional five-second cycle delay. Three devices are attached:
//!
//! - 0x23, presence only (its identification registers read as zero),
//! - 0x3C, which acknowledges its address but never returns read data,
//!   so every identification probe is reported as a failed read,
//! - 0x76, carrying a BME280-style chip id in register 0xD0.
//!
//! Swap [`SimulatedBus`] for [`EhalBus`] over a real `embedded-hal` I2C
//! implementation to scan actual hardware; the scanner code does not
//! change.
//!
//! [`SimulatedBus`]: i2c_census::transport::sim::SimulatedBus
//! [`EhalBus`]: i2c_census::transport::eh::EhalBus
use std::io::stdout;

use i2c_census::scan::DEFAULT_CYCLE_DELAY;
use i2c_census::transport::sim::SimulatedBus;
use i2c_census::{BoundedBus, ScanConfig, Scanner};

fn main() -> std::io::Result<()> {
    let mut sim = SimulatedBus::new();
    sim.add_device(0x23);
    sim.add_unresponsive_device(0x3C);
    sim.add_device_with_registers(0x76, &[(0xD0, 0x60)]);

    let mut bus = BoundedBus::new(sim);
    let scanner = Scanner::new(ScanConfig::default());

    println!("Starting periodic I2C scanner...");
    loop {
        scanner.run_cycle(&mut bus, &mut stdout().lock())?;
        std::thread::sleep(DEFAULT_CYCLE_DELAY);
    }
}
