use std::fmt;

use crate::transport::BusStatus;

/// Wrapper for problems during a bounded-time register read.
///
/// Neither variant is fatal to a scan cycle: the engine records a failed
/// probe and moves on to the next register or address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The register-pointer write that starts a read was not acknowledged.
    ///
    /// The enclosed [`BusStatus`] is the non-success status reported by the
    /// transport when the write transaction ended.
    WriteNotAcknowledged(BusStatus),
    /// The one-byte read did not return exactly one byte within the
    /// configured response timeout.
    ReadLengthMismatch {
        /// Number of bytes requested from the target.
        expected: usize,
        /// Number of bytes the transport actually made available.
        received: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteNotAcknowledged(status) => {
                write!(f, "register write not acknowledged ({status:?})")
            }
            Error::ReadLengthMismatch { expected, received } => {
                write!(f, "read returned {received} of {expected} requested bytes")
            }
        }
    }
}

impl std::error::Error for Error {}
