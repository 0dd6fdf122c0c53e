//! Full-cycle scanner tests against the simulated bus.
use std::time::Duration;

use i2c_census::report::{MAX_DEVICES, ProbeValue};
use i2c_census::transport::sim::SimulatedBus;
use i2c_census::transport::{BusStatus, BusTransport};
use i2c_census::{BoundedBus, ScanConfig, Scanner};

/// Transport wrapper that counts transactions by kind.
struct CountingBus<T> {
    inner: T,
    /// Completed write transactions with a STOP (presence probes).
    stopped_writes: usize,
    /// Byte-read requests (identification register reads).
    read_requests: usize,
}

impl<T> CountingBus<T> {
    fn new(inner: T) -> Self {
        Self {
            inner,
            stopped_writes: 0,
            read_requests: 0,
        }
    }
}

impl<T: BusTransport> BusTransport for CountingBus<T> {
    fn set_response_timeout(&mut self, timeout: Duration) {
        self.inner.set_response_timeout(timeout);
    }

    fn begin_transmission(&mut self, address: u8) {
        self.inner.begin_transmission(address);
    }

    fn write_byte(&mut self, byte: u8) {
        self.inner.write_byte(byte);
    }

    fn end_transmission(&mut self, send_stop: bool) -> BusStatus {
        if send_stop {
            self.stopped_writes += 1;
        }
        self.inner.end_transmission(send_stop)
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        self.read_requests += 1;
        self.inner.request_from(address, count)
    }

    fn read_byte(&mut self) -> u8 {
        self.inner.read_byte()
    }
}

fn run_with_counts(
    sim: SimulatedBus,
    config: ScanConfig,
) -> (i2c_census::report::ScanReport, String, usize, usize) {
    let mut bus = BoundedBus::new(CountingBus::new(sim));
    let mut out = Vec::new();
    let report = Scanner::new(config).run_cycle(&mut bus, &mut out).unwrap();
    let counting = bus.into_inner();
    (
        report,
        String::from_utf8(out).unwrap(),
        counting.stopped_writes,
        counting.read_requests,
    )
}

#[test]
fn discovers_acknowledging_addresses_in_ascending_order() {
    let mut sim = SimulatedBus::new();
    sim.add_device(0x76);
    sim.add_device(0x23);

    let (report, _, _, _) = run_with_counts(sim, ScanConfig::default());
    assert_eq!(report.found.as_slice(), &[0x23, 0x76]);
    assert_eq!(report.found.len(), 2);
}

#[test]
fn collection_truncates_at_capacity_but_sweep_visits_every_address() {
    let mut sim = SimulatedBus::new();
    for address in 1..=40 {
        sim.add_device(address);
    }

    let (report, _, stopped_writes, _) = run_with_counts(sim, ScanConfig::default());
    assert_eq!(report.found.len(), MAX_DEVICES);
    assert_eq!(report.found.as_slice().last(), Some(&32));
    // All 126 candidate addresses are still probed.
    assert_eq!(stopped_writes, 126);
    // Identification covers exactly the collected devices.
    assert_eq!(report.identification.len(), MAX_DEVICES);
}

#[test]
fn empty_bus_reports_none_and_skips_identification() {
    let (report, text, stopped_writes, read_requests) =
        run_with_counts(SimulatedBus::new(), ScanConfig::default());
    assert!(report.found.is_empty());
    assert!(report.identification.is_empty());
    assert_eq!(text, "I2C addresses found (0): none\n\n");
    assert_eq!(stopped_writes, 126);
    assert_eq!(read_requests, 0);
}

#[test]
fn exactly_three_probes_per_device_in_fixed_register_order() {
    let mut sim = SimulatedBus::new();
    sim.add_device_with_registers(0x76, &[(0xD0, 0x60), (0x00, 0x89), (0x0F, 0x33)]);

    let (report, _, _, read_requests) = run_with_counts(sim, ScanConfig::default());
    assert_eq!(read_requests, 3);
    let device = &report.identification[0];
    assert_eq!(
        device.probes,
        [
            (0xD0, ProbeValue::Value(0x60)),
            (0x00, ProbeValue::Value(0x89)),
            (0x0F, ProbeValue::Value(0x33)),
        ]
    );
}

#[test]
fn device_that_times_out_records_three_failed_probes() {
    let mut sim = SimulatedBus::new();
    sim.add_unresponsive_device(0x23);

    let (report, _, _, read_requests) = run_with_counts(sim, ScanConfig::default());
    // Earlier failures never cut the probe sequence short.
    assert_eq!(read_requests, 3);
    assert_eq!(
        report.identification[0].probes,
        [
            (0xD0, ProbeValue::Failed),
            (0x00, ProbeValue::Failed),
            (0x0F, ProbeValue::Failed),
        ]
    );
}

#[test]
fn one_failing_device_does_not_block_identification_of_others() {
    let mut sim = SimulatedBus::new();
    sim.add_unresponsive_device(0x23);
    sim.add_device_with_registers(0x76, &[(0xD0, 0x60)]);

    let (report, _, _, _) = run_with_counts(sim, ScanConfig::default());
    assert_eq!(report.identification[0].address, 0x23);
    assert_eq!(report.identification[0].probes[0].1, ProbeValue::Failed);
    assert_eq!(report.identification[1].address, 0x76);
    assert_eq!(
        report.identification[1].probes[0].1,
        ProbeValue::Value(0x60)
    );
}

#[test]
fn disabling_id_probing_performs_no_register_reads() {
    let mut sim = SimulatedBus::new();
    sim.add_device(0x23);

    let config = ScanConfig {
        probe_ids: false,
        ..ScanConfig::default()
    };
    let (report, text, _, read_requests) = run_with_counts(sim, config);
    assert_eq!(read_requests, 0);
    assert!(report.identification.is_empty());
    assert_eq!(text, "I2C addresses found (1): 0x23\n\n");
}

#[test]
fn register_holding_0xff_is_reported_as_a_value() {
    let mut sim = SimulatedBus::new();
    sim.add_device_with_registers(0x76, &[(0xD0, 0xFF)]);

    let (report, text, _, _) = run_with_counts(sim, ScanConfig::default());
    assert_eq!(report.identification[0].probes[0].1, ProbeValue::Value(0xFF));
    assert!(text.contains("  reg 0xD0 = 0xFF\n"));
}

#[test]
fn full_cycle_text_for_two_devices() {
    let mut sim = SimulatedBus::new();
    sim.add_device_with_registers(0x23, &[(0x00, 0x44)]);
    sim.add_device_with_registers(0x76, &[(0xD0, 0x60)]);
    let mut bus = BoundedBus::new(sim);

    let mut out = Vec::new();
    Scanner::new(ScanConfig::default())
        .run_cycle(&mut bus, &mut out)
        .unwrap();

    let expected = "\
I2C addresses found (2): 0x23, 0x76
Device 0x23 ID probe:
  reg 0xD0 = 0x00
  reg 0x00 = 0x44
  reg 0x0F = 0x00
Device 0x76 ID probe:
  reg 0xD0 = 0x60
  reg 0x00 = 0x00
  reg 0x0F = 0x00

";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn cycles_over_an_unchanged_bus_are_idempotent() {
    let mut sim = SimulatedBus::new();
    sim.add_device_with_registers(0x23, &[(0xD0, 0x60), (0x0F, 0xFF)]);
    sim.add_unresponsive_device(0x3C);
    let mut bus = BoundedBus::new(sim);
    let scanner = Scanner::new(ScanConfig::default());

    let mut first = Vec::new();
    let first_report = scanner.run_cycle(&mut bus, &mut first).unwrap();
    let mut second = Vec::new();
    let second_report = scanner.run_cycle(&mut bus, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[test]
fn rendered_report_matches_streamed_output() {
    let mut sim = SimulatedBus::new();
    sim.add_device_with_registers(0x76, &[(0xD0, 0x60)]);
    let mut bus = BoundedBus::new(sim);

    let mut streamed = Vec::new();
    let report = Scanner::new(ScanConfig::default())
        .run_cycle(&mut bus, &mut streamed)
        .unwrap();

    let mut rendered = Vec::new();
    report.write_text(&mut rendered).unwrap();
    assert_eq!(streamed, rendered);
}
