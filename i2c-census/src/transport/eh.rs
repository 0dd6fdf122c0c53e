//! [`BusTransport`] adapter over an [`embedded_hal::i2c::I2c`] bus.
use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::i2c::{ErrorKind, I2c, NoAcknowledgeSource, SevenBitAddress};

use super::{BusStatus, BusTransport};

/// Raw status code reported for bus errors with no closer classification.
const OTHER_ERROR_CODE: u8 = 4;

/// Wire-style transport over any blocking [`embedded_hal::i2c::I2c`]
/// implementation.
///
/// Two details of the mapping are worth knowing:
///
/// - `end_transmission(false)` cannot be sent on its own, because the
///   `I2c` trait has no write-without-stop operation. The queued write is
///   held back and coalesced with the following
///   [`request_from`](BusTransport::request_from) into a single
///   `write_read` transaction, which preserves the repeated start on the
///   wire. A consequence is that an address nack for the held-back write
///   surfaces as a short read count rather than at `end_transmission`.
/// - [`set_response_timeout`](BusTransport::set_response_timeout) is
///   recorded but not enforced here; the `I2c` trait has no timeout
///   surface, so bounding the exchange is the inner implementation's
///   concern. The recorded value can be read back with
///   [`response_timeout`](EhalBus::response_timeout).
#[derive(Debug)]
pub struct EhalBus<I> {
    inner: I,
    timeout: Duration,
    tx_address: u8,
    tx_buffer: Vec<u8>,
    /// Register-pointer write held back for the next read's repeated start.
    pending_write: Option<(u8, Vec<u8>)>,
    rx_queue: VecDeque<u8>,
}

impl<I> EhalBus<I>
where
    I: I2c<SevenBitAddress>,
{
    /// Wrap an `embedded-hal` I2C bus.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            timeout: Duration::ZERO,
            tx_address: 0,
            tx_buffer: Vec::new(),
            pending_write: None,
            rx_queue: VecDeque::new(),
        }
    }

    /// The most recently configured response timeout.
    pub fn response_timeout(&self) -> Duration {
        self.timeout
    }

    /// Give back the wrapped bus.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

/// Collapse an `embedded-hal` error into the transport status taxonomy.
fn status_from_error<E: embedded_hal::i2c::Error>(error: E) -> BusStatus {
    match error.kind() {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusStatus::AddressNack,
        ErrorKind::NoAcknowledge(_) => BusStatus::DataNack,
        _ => BusStatus::Other(OTHER_ERROR_CODE),
    }
}

impl<I> BusTransport for EhalBus<I>
where
    I: I2c<SevenBitAddress>,
{
    fn set_response_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn begin_transmission(&mut self, address: u8) {
        self.tx_address = address;
        self.tx_buffer.clear();
        self.pending_write = None;
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx_buffer.push(byte);
    }

    fn end_transmission(&mut self, send_stop: bool) -> BusStatus {
        if !send_stop {
            // Held back until request_from so the write and the read form
            // one transaction with a repeated start between them.
            let queued = std::mem::take(&mut self.tx_buffer);
            self.pending_write = Some((self.tx_address, queued));
            return BusStatus::Success;
        }
        match self.inner.write(self.tx_address, &self.tx_buffer) {
            Ok(()) => BusStatus::Success,
            Err(error) => status_from_error(error),
        }
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let mut buffer = vec![0u8; count];
        let result = match self.pending_write.take() {
            Some((write_address, queued)) if write_address == address => {
                self.inner.write_read(address, &queued, &mut buffer)
            }
            _ => self.inner.read(address, &mut buffer),
        };
        match result {
            Ok(()) => {
                self.rx_queue.extend(buffer);
                count
            }
            Err(_) => 0,
        }
    }

    fn read_byte(&mut self) -> u8 {
        self.rx_queue.pop_front().unwrap_or(0)
    }
}
