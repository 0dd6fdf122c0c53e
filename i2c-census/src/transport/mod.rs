//! The byte-level bus transport consumed by the scanner.
//!
//! [`BusTransport`] mirrors the shape of a classic Wire-style two-wire
//! interface: a write transaction is opened with
//! [`begin_transmission`](BusTransport::begin_transmission), bytes are
//! queued with [`write_byte`](BusTransport::write_byte), and the whole
//! exchange happens when [`end_transmission`](BusTransport::end_transmission)
//! runs. Reads are requested up front with
//! [`request_from`](BusTransport::request_from) and drained one byte at a
//! time.
//!
//! Nothing in this module talks to hardware. [`eh::EhalBus`] adapts any
//! [`embedded_hal::i2c::I2c`] implementation to this trait, and
//! [`sim::SimulatedBus`] provides a deterministic in-memory bus.

use std::time::Duration;

pub mod eh;
pub mod sim;

/// Outcome of a completed write transaction.
///
/// The scanner treats every non-[`Success`](BusStatus::Success) status
/// uniformly as "absent or failed"; the distinct variants exist so the
/// transport can report what it actually observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStatus {
    /// Every byte of the transaction, including the address, was
    /// acknowledged.
    Success,
    /// No device acknowledged the address byte.
    AddressNack,
    /// The device acknowledged its address but refused a data byte.
    DataNack,
    /// Any other bus-level failure, with the transport's raw status code.
    ///
    /// This covers arbitration loss, a response timeout, and anything
    /// else the underlying implementation cannot classify.
    Other(u8),
}

impl BusStatus {
    /// Whether the transaction completed with every byte acknowledged.
    pub fn is_success(self) -> bool {
        matches!(self, BusStatus::Success)
    }
}

/// A blocking byte-level bus with start/stop/repeated-start semantics.
///
/// Implementations are expected to bound every request/response exchange
/// by the timeout given to
/// [`set_response_timeout`](BusTransport::set_response_timeout), reporting
/// an expired exchange as a non-success [`BusStatus`] or a short byte
/// count rather than blocking indefinitely.
///
/// The bus protocol is one transaction at a time; implementations never
/// need to support overlapping transactions.
pub trait BusTransport {
    /// Set the maximum time a single request/response exchange may take.
    ///
    /// A zero timeout is accepted and simply disables the safety margin;
    /// whether that is wise is the caller's business.
    fn set_response_timeout(&mut self, timeout: Duration);

    /// Open a write transaction to the given 7-bit address.
    ///
    /// Nothing is sent on the bus until
    /// [`end_transmission`](BusTransport::end_transmission).
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the open write transaction.
    fn write_byte(&mut self, byte: u8);

    /// Perform the queued write transaction and report its outcome.
    ///
    /// With `send_stop` false the bus is held so that a following
    /// [`request_from`](BusTransport::request_from) continues the
    /// transaction with a repeated start. A transaction with no queued
    /// bytes is an address-only probe and must not be interpreted as a
    /// data transfer by any device.
    fn end_transmission(&mut self, send_stop: bool) -> BusStatus;

    /// Request `count` bytes from the given address.
    ///
    /// Returns the number of bytes actually made available, which may be
    /// less than `count` (including zero) if the device did not respond
    /// within the configured timeout. The bytes are drained with
    /// [`read_byte`](BusTransport::read_byte).
    fn request_from(&mut self, address: u8, count: usize) -> usize;

    /// Take the next byte made available by
    /// [`request_from`](BusTransport::request_from).
    ///
    /// Calling this with no byte pending returns 0; callers are expected
    /// to respect the count returned by `request_from`.
    fn read_byte(&mut self) -> u8;
}
