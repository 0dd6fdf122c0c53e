use std::io::stdout;
use std::thread;
use std::time::Duration;

use i2c_census::transport::sim::SimulatedBus;
use i2c_census::{BoundedBus, ScanConfig, Scanner};

use crate::cli::{ScanArgs, WatchArgs};

fn build_bus(args: &ScanArgs) -> BoundedBus<SimulatedBus> {
    let mut sim = SimulatedBus::new();
    for spec in &args.devices {
        sim.add_device_with_registers(spec.address, &spec.registers);
    }
    for &address in &args.mute_devices {
        sim.add_unresponsive_device(address);
    }
    BoundedBus::new(sim)
}

fn build_scanner(args: &ScanArgs) -> Scanner {
    Scanner::new(ScanConfig {
        probe_ids: !args.no_probe,
        timeout: Duration::from_millis(args.timeout_ms),
    })
}

pub(crate) fn scan_action(args: &ScanArgs) -> anyhow::Result<()> {
    let mut bus = build_bus(args);
    build_scanner(args).run_cycle(&mut bus, &mut stdout().lock())?;
    Ok(())
}

pub(crate) fn watch_action(args: &WatchArgs) -> anyhow::Result<()> {
    let mut bus = build_bus(&args.scan);
    let scanner = build_scanner(&args.scan);
    let interval = Duration::from_millis(args.interval_ms);

    println!("Starting periodic I2C scanner...");
    let mut completed: u32 = 0;
    loop {
        scanner.run_cycle(&mut bus, &mut stdout().lock())?;
        completed += 1;
        if args.cycles != 0 && completed >= args.cycles {
            return Ok(());
        }
        thread::sleep(interval);
    }
}
