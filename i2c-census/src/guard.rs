//! Bounded-time wrapper around the raw bus transport.
use std::time::Duration;

use crate::error::Error;
use crate::transport::{BusStatus, BusTransport};

/// Transport guard: every transaction completes or fails within the
/// configured response timeout.
///
/// The guard is what keeps a stuck bus (SCL held low, device holding SDA)
/// from hanging the scanner: the timeout it configures on the transport is
/// the hard upper bound on any single exchange. It adds no retries of its
/// own; retry policy, if any, belongs to the caller, and none is
/// implemented anywhere in this crate.
#[derive(Debug)]
pub struct BoundedBus<T> {
    transport: T,
}

impl<T> BoundedBus<T>
where
    T: BusTransport,
{
    /// Wrap a transport. Call [`configure_timeout`](Self::configure_timeout)
    /// before scanning; [`Scanner::run_cycle`](crate::Scanner::run_cycle)
    /// does so from its configuration.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Set the maximum duration of a single request/response exchange.
    ///
    /// A zero timeout is accepted and disables the safety margin rather
    /// than being rejected.
    pub fn configure_timeout(&mut self, timeout: Duration) {
        self.transport.set_response_timeout(timeout);
    }

    /// Probe an address with a zero-length write.
    ///
    /// Address-only, no data byte, so no device can mistake it for a real
    /// data transaction. Returns true iff the address was acknowledged.
    pub fn probe_address(&mut self, address: u8) -> bool {
        self.transport.begin_transmission(address);
        self.transport.end_transmission(true).is_success()
    }

    /// Read one register byte: register-pointer write, repeated start,
    /// one-byte read.
    pub fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Error> {
        self.transport.begin_transmission(address);
        self.transport.write_byte(register);
        let status = self.transport.end_transmission(false);
        if !status.is_success() {
            return Err(Error::WriteNotAcknowledged(status));
        }
        let received = self.transport.request_from(address, 1);
        if received != 1 {
            return Err(Error::ReadLengthMismatch {
                expected: 1,
                received,
            });
        }
        Ok(self.transport.read_byte())
    }

    /// Give back the wrapped transport.
    pub fn into_inner(self) -> T {
        self.transport
    }
}
