#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod error;
mod guard;
pub mod report;
pub mod scan;
pub mod transport;

pub use error::Error;
pub use guard::BoundedBus;
pub use scan::{ScanConfig, Scanner};
